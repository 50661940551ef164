pub mod error;
pub mod ringbuf;

pub use ringbuf::settings::RingBufferSettings;
pub use ringbuf::settings::RingBufferSettingsBuilder;
pub use ringbuf::RingBuffer;
