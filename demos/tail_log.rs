use std::ffi::c_void;
use std::io::Write;
use std::num::NonZeroUsize;
use std::ptr::NonNull;

use nix::sys::mman;
use nix::sys::mman::MapFlags;
use nix::sys::mman::ProtFlags;
use region_ringbuf::RingBuffer;
use tracing::error;
use tracing::info;

const MAGIC: &[u8; 4] = b"TAIL";
const HEADER_LEN: usize = 8;
const CAPACITY: usize = 64;

/// A shared mapping of a file, unmapped on drop.
struct Mapping {
    ptr: NonNull<c_void>,
    len: usize,
}

impl Mapping {
    fn new(file: &std::fs::File, len: usize) -> nix::Result<Self> {
        let rw_prot = ProtFlags::PROT_READ | ProtFlags::PROT_WRITE;
        // Unwrap is safe here because HEADER_LEN + CAPACITY is not zero.
        let mmap_len = NonZeroUsize::new(len).unwrap();

        let ptr = unsafe {
            mman::mmap(None, mmap_len, rw_prot, MapFlags::MAP_SHARED, file, 0)?
        };

        Ok(Mapping { ptr, len })
    }
}

impl AsRef<[u8]> for Mapping {
    fn as_ref(&self) -> &[u8] {
        let ptr = self.ptr.as_ptr() as *const u8;

        unsafe { std::slice::from_raw_parts(ptr, self.len) }
    }
}

impl AsMut<[u8]> for Mapping {
    fn as_mut(&mut self) -> &mut [u8] {
        let ptr = self.ptr.as_ptr() as *mut u8;

        unsafe { std::slice::from_raw_parts_mut(ptr, self.len) }
    }
}

impl Drop for Mapping {
    fn drop(&mut self) {
        if let Err(e) = unsafe { mman::munmap(self.ptr, self.len) } {
            error!("munmap failed: {:?}, mmap_len: {}", e, self.len);
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let file = tempfile::tempfile().unwrap();
    file.set_len((HEADER_LEN + CAPACITY) as u64).unwrap();

    let mapping = Mapping::new(&file, HEADER_LEN + CAPACITY).unwrap();
    let mut ringbuf = RingBuffer::new(mapping, HEADER_LEN, CAPACITY).unwrap();

    // The header in front of the window belongs to us, not the ring buffer.
    let header = ringbuf.metadata_mut();
    header[..4].copy_from_slice(MAGIC);
    header[4..].copy_from_slice(&(CAPACITY as u32).to_le_bytes());

    for i in 1..=20 {
        writeln!(ringbuf, "event {}", i).unwrap();
    }

    info!(
        "total written: {}, retained: {}",
        ringbuf.total_written(),
        ringbuf.len()
    );

    let tail = ringbuf.snapshot();
    println!("{}", String::from_utf8_lossy(&tail));

    let header = ringbuf.metadata();
    info!(
        "header magic: {}, capacity: {}",
        String::from_utf8_lossy(&header[..4]),
        u32::from_le_bytes([header[4], header[5], header[6], header[7]])
    );
}
