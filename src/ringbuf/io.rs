//! [`std::io`] adapters for [`RingBuffer`].
//!
//! Neither adapter ever returns an error. The reader never reports end of
//! data, so `read_to_end` and `read_to_string` do not return; bound reads
//! with `read_exact` or `take` instead.

use std::io;

use super::RingBuffer;

impl<R> io::Write for RingBuffer<R>
where
    R: AsRef<[u8]> + AsMut<[u8]>,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(RingBuffer::write(self, buf))
    }

    /// Flushing the region, ex: `msync` for a mapped file, is left to the
    /// owner of the region.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<R> io::Read for RingBuffer<R>
where
    R: AsRef<[u8]>,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(RingBuffer::read(self, buf))
    }
}
