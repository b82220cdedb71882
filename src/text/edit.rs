//! Edit brackets and buffer-changed notifications.
//!
//! Every mutation of a [`TextBuffer`](super::TextBuffer) happens inside a
//! begin/end bracket. Edits inside one bracket are folded into a single
//! [`BufferChange`] that describes the net effect, published when the
//! outermost bracket closes.

use bitflags::bitflags;
use std::ops::Range;

bitflags! {
    /// What kind of editing a change contains.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EditActions: u8 {
        /// Characters were inserted, deleted or replaced.
        const CHARACTERS = 0x01;
        /// Attributes were changed.
        const ATTRIBUTES = 0x02;
    }
}

/// Who initiated a change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    /// Typing, pasting or deleting through the edit surface.
    User,
    /// A host API call such as inserting or removing an attachment.
    #[default]
    Programmatic,
    /// A promotion issued by the tokenizer.
    Tokenizer,
}

/// The net effect of one edit bracket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferChange {
    pub actions: EditActions,
    /// Edited range in post-edit offsets.
    pub range: Range<usize>,
    /// Net change in buffer length.
    pub delta: isize,
    /// Buffer revision after the edit.
    pub revision: u64,
    pub origin: ChangeOrigin,
}

impl BufferChange {
    /// Check if characters (not only attributes) changed.
    #[must_use]
    pub const fn edited_characters(&self) -> bool {
        self.actions.contains(EditActions::CHARACTERS)
    }
}

/// Accumulated effect of the edits in an open bracket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingEdit {
    pub actions: EditActions,
    pub range: Range<usize>,
    pub delta: isize,
}

impl PendingEdit {
    /// Fold in the replacement of `range` (pre-edit offsets) by `inserted` chars.
    pub fn characters(pending: Option<Self>, range: &Range<usize>, inserted: usize) -> Self {
        let new_range = range.start..range.start + inserted;
        let delta = inserted as isize - (range.end - range.start) as isize;
        match pending {
            None => Self {
                actions: EditActions::CHARACTERS,
                range: new_range,
                delta,
            },
            Some(prev) => {
                let start = map_offset(prev.range.start, range, inserted, false);
                let end = map_offset(prev.range.end, range, inserted, true);
                Self {
                    actions: prev.actions | EditActions::CHARACTERS,
                    range: start.min(new_range.start)..end.max(new_range.end),
                    delta: prev.delta + delta,
                }
            }
        }
    }

    /// Fold in an attribute change over `range`.
    pub fn attributes(pending: Option<Self>, range: &Range<usize>) -> Self {
        match pending {
            None => Self {
                actions: EditActions::ATTRIBUTES,
                range: range.clone(),
                delta: 0,
            },
            Some(prev) => Self {
                actions: prev.actions | EditActions::ATTRIBUTES,
                range: prev.range.start.min(range.start)..prev.range.end.max(range.end),
                delta: prev.delta,
            },
        }
    }
}

/// Map an offset through the replacement of `range` by `inserted` chars.
///
/// Offsets inside the replaced range collapse to its start, or to the end of
/// the inserted text when `is_end` is set.
fn map_offset(offset: usize, range: &Range<usize>, inserted: usize, is_end: bool) -> usize {
    if offset <= range.start {
        offset
    } else if offset >= range.end {
        offset - (range.end - range.start) + inserted
    } else if is_end {
        range.start + inserted
    } else {
        range.start
    }
}

/// Bracket depth and the pending edit of the open bracket.
#[derive(Clone, Debug, Default)]
pub(crate) struct EditTracker {
    pub depth: usize,
    pub pending: Option<PendingEdit>,
    pub origin: ChangeOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_replacement() {
        let edit = PendingEdit::characters(None, &(2..5), 1);
        assert_eq!(edit.range, 2..3);
        assert_eq!(edit.delta, -2);
        assert_eq!(edit.actions, EditActions::CHARACTERS);
    }

    #[test]
    fn test_insert_then_delete_after() {
        // Insert one char at 3, then delete 4..6.
        let edit = PendingEdit::characters(None, &(3..3), 1);
        let edit = PendingEdit::characters(Some(edit), &(4..6), 0);
        assert_eq!(edit.range, 3..4);
        assert_eq!(edit.delta, -1);
    }

    #[test]
    fn test_edits_before_previous_shift_it() {
        // Insert "ab" at 10, then insert "x" at 0.
        let edit = PendingEdit::characters(None, &(10..10), 2);
        let edit = PendingEdit::characters(Some(edit), &(0..0), 1);
        assert_eq!(edit.range, 0..13);
        assert_eq!(edit.delta, 3);
    }

    #[test]
    fn test_placeholder_then_word_removal() {
        // Replace a word the way promotion does: placeholder at 4, then drop 5..8.
        let edit = PendingEdit::characters(None, &(4..4), 1);
        let edit = PendingEdit::characters(Some(edit), &(5..8), 0);
        assert_eq!(edit.range, 4..5);
        assert_eq!(edit.delta, -2);
    }

    #[test]
    fn test_attribute_edit_keeps_delta() {
        let edit = PendingEdit::characters(None, &(0..0), 3);
        let edit = PendingEdit::attributes(Some(edit), &(1..6));
        assert_eq!(edit.range, 0..6);
        assert_eq!(edit.delta, 3);
        assert!(edit.actions.contains(EditActions::CHARACTERS | EditActions::ATTRIBUTES));
    }

    #[test]
    fn test_map_offset() {
        assert_eq!(map_offset(1, &(2..4), 5, false), 1);
        assert_eq!(map_offset(6, &(2..4), 5, false), 9);
        assert_eq!(map_offset(3, &(2..4), 5, false), 2);
        assert_eq!(map_offset(3, &(2..4), 5, true), 7);
    }
}
