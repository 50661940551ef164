use std::ops::Range;

use snafu::ensure;
use snafu::OptionExt;

use crate::error;
use crate::error::Result;

/// The part of a region that the ring buffer owns.
///
/// ```text
///  0                 start                                start + len
///  |                   |                                       |
///  v                   v                                       v
///  +-------------------+---------------------------------------+-----------+
///  | metadata          | window                                | untouched |
///  +-------------------+---------------------------------------+-----------+
///  | start bytes       | len bytes                             |           |
///  +-------------------+---------------------------------------+-----------+
/// ```
///
/// Only `region[start..start + len]` is ever read or written through a
/// [`Window`]. The metadata prefix belongs to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Window {
    start: usize,
    len: usize,
}

impl Window {
    /// Create a window of `len` bytes starting `start` bytes into a region
    /// of `region_len` bytes.
    pub(crate) fn new(
        region_len: usize,
        start: usize,
        len: usize,
    ) -> Result<Self> {
        ensure!(
            len > 0,
            error::InvalidParameterSnafu {
                detail: "The capacity must be greater than 0.",
            }
        );

        let end = start
            .checked_add(len)
            .context(error::UsizeAddOverflowSnafu { a: start, b: len })?;

        ensure!(
            end <= region_len,
            error::SizeSnafu {
                region_len,
                offset: start,
                capacity: len,
            }
        );

        Ok(Self { start, len })
    }

    pub(crate) fn start(&self) -> usize {
        self.start
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// The window inside `region`.
    ///
    /// Panics if `region` shrank below the length it was validated against.
    pub(crate) fn slice<'a>(&self, region: &'a [u8]) -> &'a [u8] {
        &region[self.range()]
    }

    pub(crate) fn slice_mut<'a>(&self, region: &'a mut [u8]) -> &'a mut [u8] {
        &mut region[self.range()]
    }
}
