//! Rope wrapper using the ropey crate.
//!
//! Every offset taken or returned here is a char (Unicode scalar value)
//! index. UTF-16 conversions exist only for hosts that speak UTF-16.

use ropey::str_utils::byte_to_char_idx;
use ropey::{Rope, RopeSlice};
use std::ops::Range;
use unicode_segmentation::{GraphemeCursor, GraphemeIncomplete};

/// Wrapper around `ropey::Rope` with clamping convenience methods.
#[derive(Clone, Debug, Default)]
pub struct RopeWrapper {
    rope: Rope,
}

impl RopeWrapper {
    /// Create an empty rope.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a rope from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Character at `char_idx`, if in bounds.
    #[must_use]
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        self.rope.get_char(char_idx)
    }

    /// Get a slice of the rope. Out-of-range requests yield an empty slice.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> RopeSlice<'_> {
        self.rope
            .get_slice(range)
            .unwrap_or_else(|| self.rope.slice(..0))
    }

    /// Iterate over the characters in `range`.
    pub fn chars_in(&self, range: Range<usize>) -> impl Iterator<Item = char> + '_ {
        self.slice(range).chars()
    }

    /// Replace `range` with `text`. The caller validates `range`.
    pub fn splice(&mut self, range: Range<usize>, text: &str) {
        if range.start < range.end {
            self.rope.remove(range.clone());
        }
        if !text.is_empty() {
            self.rope.insert(range.start, text);
        }
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }

    /// Convert a char index to a UTF-16 code unit index.
    #[must_use]
    pub fn char_to_utf16(&self, char_idx: usize) -> usize {
        self.rope.char_to_utf16_cu(char_idx.min(self.len_chars()))
    }

    /// Convert a UTF-16 code unit index to a char index.
    ///
    /// An index in the middle of a surrogate pair maps to the char holding it.
    #[must_use]
    pub fn utf16_to_char(&self, utf16_idx: usize) -> usize {
        self.rope
            .utf16_cu_to_char(utf16_idx.min(self.rope.len_utf16_cu()))
    }

    /// Grapheme boundary strictly before `char_idx` (0 at the start).
    ///
    /// Walks rope chunks with a [`GraphemeCursor`], so clusters spanning
    /// chunk boundaries and long regional-indicator runs are handled.
    #[must_use]
    pub fn prev_grapheme_boundary(&self, char_idx: usize) -> usize {
        let char_idx = char_idx.min(self.len_chars());
        let byte_idx = self.rope.char_to_byte(char_idx);
        let (mut chunk, mut chunk_byte, mut chunk_char, _) = self.rope.chunk_at_byte(byte_idx);
        let mut cursor = GraphemeCursor::new(byte_idx, self.rope.len_bytes(), true);
        loop {
            match cursor.prev_boundary(chunk, chunk_byte) {
                Ok(None) => return 0,
                Ok(Some(boundary)) => {
                    return chunk_char + byte_to_char_idx(chunk, boundary - chunk_byte);
                }
                Err(GraphemeIncomplete::PrevChunk) => {
                    (chunk, chunk_byte, chunk_char, _) = self.rope.chunk_at_byte(chunk_byte - 1);
                }
                Err(GraphemeIncomplete::PreContext(end)) => {
                    let context = self.rope.chunk_at_byte(end - 1).0;
                    cursor.provide_context(context, end - context.len());
                }
                Err(_) => return char_idx.saturating_sub(1),
            }
        }
    }

    /// Grapheme boundary strictly after `char_idx` (`len_chars` at the end).
    #[must_use]
    pub fn next_grapheme_boundary(&self, char_idx: usize) -> usize {
        let len = self.len_chars();
        let char_idx = char_idx.min(len);
        let byte_idx = self.rope.char_to_byte(char_idx);
        let (mut chunk, mut chunk_byte, mut chunk_char, _) = self.rope.chunk_at_byte(byte_idx);
        let mut cursor = GraphemeCursor::new(byte_idx, self.rope.len_bytes(), true);
        loop {
            match cursor.next_boundary(chunk, chunk_byte) {
                Ok(None) => return len,
                Ok(Some(boundary)) => {
                    return chunk_char + byte_to_char_idx(chunk, boundary - chunk_byte);
                }
                Err(GraphemeIncomplete::NextChunk) => {
                    chunk_byte += chunk.len();
                    (chunk, _, chunk_char, _) = self.rope.chunk_at_byte(chunk_byte);
                }
                Err(GraphemeIncomplete::PreContext(end)) => {
                    let context = self.rope.chunk_at_byte(end - 1).0;
                    cursor.provide_context(context, end - context.len());
                }
                Err(_) => return (char_idx + 1).min(len),
            }
        }
    }
}

impl From<&str> for RopeWrapper {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}
