const DEFAULT_OFFSET: usize = 0;
const DEFAULT_RESET_READ_CURSOR: bool = false;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBufferSettings {
    pub(super) offset: usize,
    pub(super) capacity: Option<usize>,
    pub(super) reset_read_cursor: bool,
}

impl Default for RingBufferSettings {
    fn default() -> Self {
        RingBufferSettingsBuilder::new().build()
    }
}

#[derive(Default)]
pub struct RingBufferSettingsBuilder {
    offset: Option<usize>,
    capacity: Option<usize>,
    reset_read_cursor: Option<bool>,
}

impl RingBufferSettingsBuilder {
    pub fn new() -> Self {
        RingBufferSettingsBuilder::default()
    }

    /// Set the number of leading bytes of the region reserved for the caller.
    /// The ring buffer never reads or writes them.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the capacity of the ring buffer. If not set, the ring buffer uses
    /// everything after the offset.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set whether [`reset`] also moves the read cursor back to the start of
    /// the window.
    ///
    /// [`reset`]: crate::RingBuffer::reset
    pub fn reset_read_cursor(mut self, reset: bool) -> Self {
        self.reset_read_cursor = Some(reset);
        self
    }

    pub fn build(self) -> RingBufferSettings {
        let offset = self.offset.unwrap_or(DEFAULT_OFFSET);

        let reset_read_cursor = self
            .reset_read_cursor
            .unwrap_or(DEFAULT_RESET_READ_CURSOR);

        RingBufferSettings {
            offset,
            capacity: self.capacity,
            reset_read_cursor,
        }
    }
}
