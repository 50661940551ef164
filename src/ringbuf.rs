pub mod io;
pub mod settings;
mod window;

use std::borrow::Cow;
use std::fmt;

use settings::RingBufferSettings;
use snafu::OptionExt;
use tracing::debug;
use tracing::error;
use tracing::trace;
use window::Window;

use crate::error;
use crate::error::Result;

/// A byte ring buffer laid over a caller-provided region, ex: a heap buffer
/// or a memory-mapped file.
///
/// ## The underlying structure
///
/// ```text
///                   read_cursor          write_cursor
///                        |                    |
///                        v                    v
/// +-------------------+-----------------------------------------+-----------+
/// | metadata          | window                                  | untouched |
/// +-------------------+-----------------------------------------+-----------+
/// | offset bytes      | capacity bytes                          |           |
/// +-------------------+-----------------------------------------+-----------+
/// ```
///
/// Writes never fail. Once more than `capacity` bytes have been written, the
/// oldest bytes are overwritten, so the window always holds the most recent
/// `min(total_written, capacity)` bytes.
///
/// The read cursor is independent of the write cursor. [`RingBuffer::read`]
/// streams the physical window, wrapping forever, and has no notion of how
/// much was written. Use [`RingBuffer::snapshot`] for the logical contents.
///
/// The metadata prefix and anything after the window are never touched, so
/// the caller can keep its own header in the same region.
pub struct RingBuffer<R> {
    /// The underlying region, held by value. Use `&mut [u8]` to borrow.
    region: R,

    /// The part of the region used as the ring.
    window: Window,

    /// The next write position, relative to the window start.
    write_cursor: usize,

    /// The next read position, relative to the window start.
    read_cursor: usize,

    /// The number of bytes ever written, cleared only by reset.
    total_written: u64,

    /// Whether reset also clears the read cursor.
    reset_read_cursor: bool,
}

impl<R> RingBuffer<R>
where
    R: AsRef<[u8]>,
{
    /// Creates a ring buffer over `region[offset..offset + capacity]`.
    ///
    /// Fails with [`error::Error::Size`] if the region cannot hold the window,
    /// and with [`error::Error::InvalidParameter`] if `capacity` is zero.
    pub fn new(region: R, offset: usize, capacity: usize) -> Result<Self> {
        let settings = settings::RingBufferSettingsBuilder::new()
            .offset(offset)
            .capacity(capacity)
            .build();

        Self::with_settings(region, settings)
    }

    /// Creates a ring buffer with the given settings.
    ///
    /// Note: it does not modify the region.
    pub fn with_settings(
        region: R,
        settings: RingBufferSettings,
    ) -> Result<Self> {
        let RingBufferSettings {
            offset,
            capacity,
            reset_read_cursor,
        } = settings;

        let region_len = region.as_ref().len();

        let capacity = match capacity {
            Some(capacity) => capacity,
            None => region_len.checked_sub(offset).context(
                error::SizeSnafu {
                    region_len,
                    offset,
                    capacity: 0_usize,
                },
            )?,
        };

        let window = Window::new(region_len, offset, capacity)?;

        debug!(
            "create ring buffer, region_len: {}, offset: {}, capacity: {}",
            region_len, offset, capacity
        );

        Ok(RingBuffer {
            region,
            window,
            write_cursor: 0,
            read_cursor: 0,
            total_written: 0,
            reset_read_cursor,
        })
    }

    /// Reads `dst.len()` bytes from the window, starting at the read cursor
    /// and wrapping around the window end as many times as needed.
    ///
    /// This is a raw reader over the physical window: it ignores the write
    /// cursor and never runs out of data. Bytes that were never written are
    /// returned as whatever the region holds.
    ///
    /// Always returns `dst.len()`.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let capacity = self.capacity();
        let window = self.window.slice(self.region.as_ref());

        let mut filled = 0;
        while filled < dst.len() {
            if self.read_cursor >= capacity {
                error!(
                    "read cursor out of window, read_cursor: {}, capacity: {}",
                    self.read_cursor, capacity
                );
                debug_assert!(
                    self.read_cursor < capacity,
                    "corrupted read cursor"
                );
                self.read_cursor = 0;
            }

            let n = (dst.len() - filled).min(capacity - self.read_cursor);
            let src = &window[self.read_cursor..self.read_cursor + n];
            dst[filled..filled + n].copy_from_slice(src);

            filled += n;
            self.read_cursor += n;
            if self.read_cursor == capacity {
                self.read_cursor = 0;
            }
        }

        filled
    }

    /// Returns the retained bytes, oldest first.
    ///
    /// Until the buffer wraps, and whenever the write cursor sits at the
    /// window start, this borrows the window directly. Otherwise the two
    /// halves are stitched into a new `capacity` length buffer.
    pub fn snapshot(&self) -> Cow<'_, [u8]> {
        let window = self.window();
        let cursor = self.write_cursor;

        if !self.is_wrapped() {
            return Cow::Borrowed(&window[..cursor]);
        }

        if cursor == 0 {
            return Cow::Borrowed(window);
        }

        let mut out = Vec::with_capacity(window.len());
        out.extend_from_slice(&window[cursor..]);
        out.extend_from_slice(&window[..cursor]);
        Cow::Owned(out)
    }

    /// Appends the retained bytes, oldest first, to `out`.
    pub fn snapshot_into(&self, out: &mut Vec<u8>) {
        let window = self.window();
        let cursor = self.write_cursor;

        out.reserve(self.len());
        if self.is_wrapped() {
            out.extend_from_slice(&window[cursor..]);
        }
        out.extend_from_slice(&window[..cursor]);
    }

    /// The number of retained bytes, `min(total_written, capacity)`.
    pub fn len(&self) -> usize {
        if self.is_wrapped() {
            self.capacity()
        } else {
            self.write_cursor
        }
    }

    /// Whether nothing has been written since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.total_written == 0
    }

    /// Get the capacity of the ring buffer.
    pub fn capacity(&self) -> usize {
        self.window.len()
    }

    /// Get the number of leading region bytes reserved for the caller.
    pub fn offset(&self) -> usize {
        self.window.start()
    }

    /// Get the number of bytes written since creation or the last reset,
    /// including bytes that have since been overwritten.
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// Get the next write position, relative to the window start.
    pub fn write_position(&self) -> usize {
        self.write_cursor
    }

    /// Get the next read position, relative to the window start.
    pub fn read_position(&self) -> usize {
        self.read_cursor
    }

    /// The caller-reserved bytes in front of the window.
    pub fn metadata(&self) -> &[u8] {
        &self.region.as_ref()[..self.offset()]
    }

    /// The whole region, metadata prefix included.
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Gives the region back to the caller.
    pub fn into_inner(self) -> R {
        self.region
    }

    /// Logically empties the ring buffer. The region bytes stay as they are
    /// until overwritten.
    ///
    /// The read cursor is kept unless the ring buffer was built with
    /// [`reset_read_cursor`](settings::RingBufferSettingsBuilder::reset_read_cursor).
    pub fn reset(&mut self) {
        self.write_cursor = 0;
        self.total_written = 0;

        if self.reset_read_cursor {
            self.read_cursor = 0;
        }

        trace!("reset ring buffer, read_cursor: {}", self.read_cursor);
    }

    fn window(&self) -> &[u8] {
        self.window.slice(self.region.as_ref())
    }

    fn is_wrapped(&self) -> bool {
        self.total_written > self.capacity() as u64
            || (self.total_written == self.capacity() as u64
                && self.write_cursor == 0)
    }
}

impl<R> RingBuffer<R>
where
    R: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Writes `buf` into the ring, overwriting the oldest bytes if needed.
    ///
    /// Only the last `capacity` bytes of an oversized `buf` can survive, so
    /// the rest is skipped. Always returns `buf.len()`.
    pub fn write(&mut self, buf: &[u8]) -> usize {
        let n = buf.len();
        self.total_written = self.total_written.saturating_add(n as u64);

        let capacity = self.capacity();
        let buf = if n > capacity { &buf[n - capacity..] } else { buf };

        let cursor = self.write_cursor;
        let remain = capacity - cursor;
        let window = self.window.slice_mut(self.region.as_mut());

        if buf.len() > remain {
            let (tail, head) = buf.split_at(remain);
            window[cursor..].copy_from_slice(tail);
            window[..head.len()].copy_from_slice(head);
        } else {
            window[cursor..cursor + buf.len()].copy_from_slice(buf);
        }

        self.write_cursor = (cursor + buf.len()) % capacity;

        n
    }

    /// The caller-reserved bytes in front of the window.
    pub fn metadata_mut(&mut self) -> &mut [u8] {
        let offset = self.offset();
        &mut self.region.as_mut()[..offset]
    }
}

impl<R> fmt::Debug for RingBuffer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("offset", &self.window.start())
            .field("capacity", &self.window.len())
            .field("write_cursor", &self.write_cursor)
            .field("read_cursor", &self.read_cursor)
            .field("total_written", &self.total_written)
            .finish_non_exhaustive()
    }
}
