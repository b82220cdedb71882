//! Error types for tagtext.

use std::ops::Range;

/// Result type alias for tagtext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tagtext operations.
///
/// Only genuinely invalid arguments are errors. Removing an attachment that
/// is no longer present and a delegate vetoing a deletion are ordinary control
/// flow and are reported through return values instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An offset or range reaches outside `[0, len]` of the buffer.
    #[error("range {start}..{end} out of bounds for buffer of length {len}")]
    Range { start: usize, end: usize, len: usize },
    /// A range whose start lies after its end.
    #[error("inverted range {start}..{end}")]
    InvertedRange { start: usize, end: usize },
}

impl Error {
    /// Build a range error for `range` against a buffer of `len` chars.
    #[must_use]
    pub fn out_of_bounds(range: &Range<usize>, len: usize) -> Self {
        Self::Range {
            start: range.start,
            end: range.end,
            len,
        }
    }
}

/// Validate that `range` is ordered and lies within `[0, len]`.
pub(crate) fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end {
        return Err(Error::InvertedRange {
            start: range.start,
            end: range.end,
        });
    }
    if range.end > len {
        return Err(Error::out_of_bounds(range, len));
    }
    Ok(())
}
