use std::io::Write;
use std::os::unix::fs::FileExt;

use region_ringbuf::RingBuffer;

use crate::common::init_tracing;
use crate::common::MmapRegion;

const HEADER: &[u8; 2] = b"v1";

#[test]
fn test_ringbuf_over_mmap() {
    init_tracing();

    let mut region = MmapRegion::tempfile(HEADER.len() + 7);
    region.as_mut()[..HEADER.len()].copy_from_slice(HEADER);

    let mut ringbuf = RingBuffer::new(region, HEADER.len(), 7).unwrap();
    ringbuf
        .write_all(b"hello world, I am a circular buffer!")
        .unwrap();

    assert_eq!(ringbuf.snapshot().as_ref(), b"buffer!");
    assert_eq!(ringbuf.metadata(), HEADER);
}

#[test]
fn test_ringbuf_writes_reach_file() {
    let region = MmapRegion::tempfile(4 + 8);

    let mut ringbuf = RingBuffer::new(region, 4, 8).unwrap();
    ringbuf.metadata_mut().copy_from_slice(b"head");
    ringbuf.write(b"0123456789");

    let mut content = [0u8; 12];
    ringbuf.region().file().read_exact_at(&mut content, 0).unwrap();

    // The last 8 bytes, with the cursor left at the window start.
    assert_eq!(&content, b"head23456789");

    let region = ringbuf.into_inner();
    assert_eq!(region.as_ref(), b"head23456789");
}

#[test]
fn test_ringbuf_reattach_after_remap() {
    let file = tempfile::tempfile().unwrap();
    let region = MmapRegion::new(file.try_clone().unwrap(), 4 + 6);

    let mut ringbuf = RingBuffer::new(region, 4, 6).unwrap();
    ringbuf.write(b"abcd");
    ringbuf.write(b"efgh");
    assert_eq!(ringbuf.snapshot().as_ref(), b"cdefgh");
    drop(ringbuf);

    // A new mapping of the same file sees the bytes written through the old
    // one. The cursors are not persisted, so reads start at the window start.
    let region = MmapRegion::new(file, 4 + 6);
    let mut ringbuf = RingBuffer::new(region, 4, 6).unwrap();

    assert!(ringbuf.snapshot().is_empty());

    let mut out = [0u8; 6];
    ringbuf.read(&mut out);
    assert_eq!(&out, b"ghcdef");
}

#[test]
fn test_ringbuf_wraps_many_times_over_mmap() {
    let mut region = MmapRegion::tempfile(16 + 32);
    region.as_mut()[..16].fill(0x5A);

    let mut ringbuf = RingBuffer::new(region, 16, 32).unwrap();

    let mut stream = Vec::new();
    for i in 0..1000u32 {
        let line = format!("line {}\n", i);
        stream.extend_from_slice(line.as_bytes());
        ringbuf.write(line.as_bytes());
    }

    assert_eq!(ringbuf.total_written(), stream.len() as u64);
    assert_eq!(ringbuf.snapshot().as_ref(), &stream[stream.len() - 32..]);
    assert!(ringbuf.metadata().iter().all(|b| *b == 0x5A));
}
