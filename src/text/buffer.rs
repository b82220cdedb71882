//! Attributed text buffer with edit brackets.
//!
//! This module provides [`TextBuffer`], a rope-backed character sequence with
//! attribute runs (font, paragraph style, attachment marker). It is the single
//! source of truth for content and offsets; every offset is a char index.

use crate::attachment::PLACEHOLDER;
use crate::error::{Result, check_range};
use crate::style::Attributes;
use crate::text::edit::{BufferChange, ChangeOrigin, EditTracker, PendingEdit};
use crate::text::rope::RopeWrapper;
use crate::text::segment::{AttachmentMarkers, AttributeRun, AttributeRuns};
use std::collections::VecDeque;
use std::ops::Range;

/// Text buffer with attribute runs and bracketed edits.
///
/// Mutations are grouped with [`begin_editing`](Self::begin_editing) and
/// [`end_editing`](Self::end_editing). A mutation issued outside a bracket
/// opens and closes its own. When the outermost bracket closes, a single
/// [`BufferChange`] describing the net edit is queued for listeners, who
/// collect it with [`take_changes`](Self::take_changes).
///
/// ```
/// use tagtext::TextBuffer;
///
/// let mut buffer = TextBuffer::with_text("see foo bar");
/// buffer.begin_editing();
/// buffer.replace(4..7, "").unwrap();
/// buffer.replace(4..4, "baz").unwrap();
/// buffer.end_editing();
///
/// assert_eq!(buffer.text(), "see baz bar");
/// let changes = buffer.take_changes();
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].range, 4..7);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: RopeWrapper,
    runs: AttributeRuns,
    tracker: EditTracker,
    changes: VecDeque<BufferChange>,
    revision: u64,
}

impl TextBuffer {
    /// Create an empty text buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial, unattributed text.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: RopeWrapper::from_str(text),
            ..Self::default()
        }
    }

    /// Number of chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    /// The whole text, placeholders included.
    #[must_use]
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text in `range`. Out-of-range requests yield an empty string.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> String {
        self.rope.slice(range).to_string()
    }

    /// Char at `offset`.
    #[must_use]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.char_at(offset)
    }

    /// Get the underlying rope.
    #[must_use]
    pub fn rope(&self) -> &RopeWrapper {
        &self.rope
    }

    /// Buffer revision (increments on every mutation).
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Open an edit bracket. Brackets nest.
    pub fn begin_editing(&mut self) {
        if self.tracker.depth == 0 {
            self.tracker.origin = ChangeOrigin::Programmatic;
        }
        self.tracker.depth += 1;
    }

    /// Open an edit bracket attributed to `origin`.
    ///
    /// The origin of the outermost bracket wins.
    pub fn begin_editing_as(&mut self, origin: ChangeOrigin) {
        let outermost = self.tracker.depth == 0;
        self.begin_editing();
        if outermost {
            self.tracker.origin = origin;
        }
    }

    /// Close an edit bracket, publishing the net change when it is the
    /// outermost one.
    pub fn end_editing(&mut self) {
        if self.tracker.depth == 0 {
            tracing::warn!(target: "tagtext.buffer", "end_editing without begin_editing");
            return;
        }
        self.tracker.depth -= 1;
        if self.tracker.depth > 0 {
            return;
        }
        if let Some(pending) = self.tracker.pending.take() {
            let change = BufferChange {
                actions: pending.actions,
                range: pending.range,
                delta: pending.delta,
                revision: self.revision,
                origin: self.tracker.origin,
            };
            tracing::trace!(
                target: "tagtext.buffer",
                start = change.range.start,
                end = change.range.end,
                delta = change.delta,
                origin = ?change.origin,
                "buffer_changed"
            );
            self.changes.push_back(change);
        }
    }

    /// Whether an edit bracket is open.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.tracker.depth > 0
    }

    /// Net edited range of the open bracket so far.
    #[must_use]
    pub fn edited_range(&self) -> Option<Range<usize>> {
        self.tracker.pending.as_ref().map(|p| p.range.clone())
    }

    /// Net change in length of the open bracket so far.
    #[must_use]
    pub fn change_in_length(&self) -> isize {
        self.tracker.pending.as_ref().map_or(0, |p| p.delta)
    }

    /// Drain the published change notifications, oldest first.
    pub fn take_changes(&mut self) -> Vec<BufferChange> {
        self.changes.drain(..).collect()
    }

    /// Whether change notifications are waiting to be collected.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Replace the chars in `range` with `text`.
    ///
    /// Fails without touching the buffer when `range` is outside `[0, len]`.
    /// Replaced chars lose their attributes; inserted chars are unattributed.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        check_range(&range, self.len())?;
        let inserted = text.chars().count();
        if range.is_empty() && inserted == 0 {
            return Ok(());
        }

        self.bracketed(|buffer| {
            buffer.rope.splice(range.clone(), text);
            buffer.runs.edit(range.clone(), inserted);
            buffer.tracker.pending = Some(PendingEdit::characters(
                buffer.tracker.pending.take(),
                &range,
                inserted,
            ));
        });
        Ok(())
    }

    /// Replace the attributes of `range`.
    ///
    /// Attribute edits never publish a change by themselves: inside a bracket
    /// they are folded into the bracket's change, outside one they are silent.
    pub fn set_attributes(&mut self, attributes: &Attributes, range: Range<usize>) -> Result<()> {
        check_range(&range, self.len())?;
        self.runs.set(range.clone(), attributes);
        self.record_attributes(&range);
        Ok(())
    }

    /// Merge `attributes` over the attributes of `range`.
    pub fn add_attributes(&mut self, attributes: &Attributes, range: Range<usize>) -> Result<()> {
        check_range(&range, self.len())?;
        self.runs.add(range.clone(), attributes);
        self.record_attributes(&range);
        Ok(())
    }

    /// Strip the attachment marker from `range`, keeping other attributes.
    pub fn remove_attachment_marker(&mut self, range: Range<usize>) -> Result<()> {
        check_range(&range, self.len())?;
        self.runs.remove_attachment(range.clone());
        self.record_attributes(&range);
        Ok(())
    }

    /// Attributes of the char at `offset`.
    #[must_use]
    pub fn attributes_at(&self, offset: usize) -> Attributes {
        self.runs.at(offset)
    }

    /// All attribute runs, left to right.
    #[must_use]
    pub fn runs(&self) -> &[AttributeRun] {
        self.runs.as_slice()
    }

    /// Attachment markers intersecting `range`, left to right.
    ///
    /// The range is clamped to the buffer. The iterator is lazy and can be
    /// cloned to enumerate again.
    #[must_use]
    pub fn attachment_markers(&self, range: Range<usize>) -> AttachmentMarkers<'_> {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.runs.attachment_markers(start..end)
    }

    /// Number of placeholder chars in the buffer.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.rope
            .chars_in(0..self.len())
            .filter(|&c| c == PLACEHOLDER)
            .count()
    }

    /// Grapheme boundary strictly before `offset` (0 at the start).
    #[must_use]
    pub fn prev_grapheme_boundary(&self, offset: usize) -> usize {
        self.rope.prev_grapheme_boundary(offset)
    }

    /// Grapheme boundary strictly after `offset` (`len` at the end).
    #[must_use]
    pub fn next_grapheme_boundary(&self, offset: usize) -> usize {
        self.rope.next_grapheme_boundary(offset)
    }

    /// Convert a char offset to a UTF-16 code unit offset.
    #[must_use]
    pub fn offset_to_utf16(&self, offset: usize) -> usize {
        self.rope.char_to_utf16(offset)
    }

    /// Convert a UTF-16 code unit offset to a char offset.
    #[must_use]
    pub fn utf16_to_offset(&self, utf16: usize) -> usize {
        self.rope.utf16_to_char(utf16)
    }

    fn bracketed(&mut self, f: impl FnOnce(&mut Self)) {
        self.begin_editing();
        f(self);
        self.bump_revision();
        self.end_editing();
    }

    fn record_attributes(&mut self, range: &Range<usize>) {
        self.bump_revision();
        if self.is_editing() {
            self.tracker.pending = Some(PendingEdit::attributes(
                self.tracker.pending.take(),
                range,
            ));
        }
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
