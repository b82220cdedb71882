//! The attachment-aware text container.
//!
//! [`Container`] composes the text buffer, the attachment registry, layout
//! and the tokenizer behind one façade. Every mutation runs inside an edit
//! bracket; the changes it publishes are turned into delegate notifications
//! and queued work, and the queue is drained before the public call returns.
//!
//! # Example
//!
//! ```
//! use tagtext::{Container, ContainerOptions};
//!
//! let mut container = Container::new(ContainerOptions::default());
//! container.insert_text("hello ").unwrap();
//!
//! // "hello" was followed by a space, so it became a tag.
//! assert_eq!(container.attachments().count(), 1);
//! assert_eq!(container.len(), 2);
//! assert_eq!(container.export_text(0..2).unwrap(), "hello ");
//! ```

mod delegate;
mod options;

pub use delegate::{AttachmentDelegate, TextDelegate};
pub use options::{ContainerOptions, DEFAULT_WIDTH};

use crate::attachment::{Attachment, AttachmentId, AttachmentRegistry, PLACEHOLDER, PLACEHOLDER_STR};
use crate::error::{Error, Result, check_range};
use crate::geometry::{EdgeInsets, Point, Rect, Size};
use crate::layout::{LayoutConfig, LayoutPass, LineFragment, TextLayout};
use crate::style::{Attributes, Font, ParagraphStyle};
use crate::text::{ChangeOrigin, TextBuffer};
use crate::tokenizer::Tokenizer;
use crate::widget::{Widget, WidgetId};
use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;

/// Upper bound on work items drained by one public call.
pub const MAX_WORK_ITEMS: usize = 256;

/// Selected char range `[start, start + length)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: usize,
    pub length: usize,
}

impl Selection {
    #[must_use]
    pub const fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Collapsed selection at `offset`.
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self::new(offset, 0)
    }

    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.length == 0
    }

    /// Map through the replacement of `range` by `inserted` chars.
    fn map(self, range: &Range<usize>, inserted: usize) -> Self {
        let map = |offset: usize, is_end: bool| {
            if offset <= range.start {
                offset
            } else if offset >= range.end {
                offset - (range.end - range.start) + inserted
            } else if is_end {
                range.start + inserted
            } else {
                range.start
            }
        };
        let start = map(self.start, false);
        let end = map(self.end(), true).max(start);
        Self::new(start, end - start)
    }
}

/// Result of inserting an attachment.
#[derive(Debug)]
pub enum InsertOutcome {
    /// The attachment now occupies a placeholder.
    Inserted(AttachmentId),
    /// The attachment delegate refused to delete attachments in the target
    /// range. Nothing changed; the attachment is handed back.
    Vetoed(Attachment),
}

impl InsertOutcome {
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }

    /// Id of the inserted attachment.
    #[must_use]
    pub const fn id(&self) -> Option<AttachmentId> {
        match self {
            Self::Inserted(id) => Some(*id),
            Self::Vetoed(_) => None,
        }
    }

    /// The refused attachment, if the insertion was vetoed.
    #[must_use]
    pub fn into_vetoed(self) -> Option<Attachment> {
        match self {
            Self::Inserted(_) => None,
            Self::Vetoed(attachment) => Some(attachment),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Job {
    Tokenize,
}

/// Text container hosting inline tag widgets.
///
/// The registry of live attachments is kept in lockstep with the
/// placeholder characters in the buffer: an attachment is registered exactly
/// while its placeholder is present.
pub struct Container {
    buffer: TextBuffer,
    registry: AttachmentRegistry,
    selection: Selection,
    options: ContainerOptions,
    typing_attributes: Attributes,
    /// `None` when an edit or geometry change made layout stale.
    layout: Option<TextLayout>,
    tokenizer: Tokenizer,
    work: VecDeque<Job>,
    draining: bool,
    active: bool,
    attachment_delegate: Option<Box<dyn AttachmentDelegate>>,
    text_delegate: Option<Box<dyn TextDelegate>>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new(ContainerOptions::default())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("text", &self.buffer.text())
            .field("attachments", &self.registry.len())
            .field("selection", &self.selection)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Container {
    /// Create an empty container.
    #[must_use]
    pub fn new(options: ContainerOptions) -> Self {
        let typing_attributes = Attributes::new()
            .with_font(options.font.clone())
            .with_paragraph(options.paragraph);
        Self {
            buffer: TextBuffer::new(),
            registry: AttachmentRegistry::new(),
            selection: Selection::default(),
            options,
            typing_attributes,
            layout: None,
            tokenizer: Tokenizer::new(),
            work: VecDeque::new(),
            draining: false,
            active: false,
            attachment_delegate: None,
            text_delegate: None,
        }
    }

    /// Use `tokenizer` for typing-driven promotion.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn set_attachment_delegate(&mut self, delegate: impl AttachmentDelegate + 'static) {
        self.attachment_delegate = Some(Box::new(delegate));
    }

    pub fn set_text_delegate(&mut self, delegate: impl TextDelegate + 'static) {
        self.text_delegate = Some(Box::new(delegate));
    }

    #[must_use]
    pub const fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// Length of the buffer in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Buffer text, placeholders included.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Live attachments in insertion order.
    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.registry.iter()
    }

    #[must_use]
    pub fn attachment(&self, id: AttachmentId) -> Option<&Attachment> {
        self.registry.get(id)
    }

    /// First live attachment wrapping `widget`.
    #[must_use]
    pub fn attachment_for_widget(&self, widget: WidgetId) -> Option<&Attachment> {
        self.registry
            .find_by_widget(widget)
            .and_then(|id| self.registry.get(id))
    }

    // ----- Attachments -----

    /// Insert `attachment` over the current selection.
    ///
    /// The selection collapses right after the new placeholder.
    pub fn insert(&mut self, attachment: Attachment) -> Result<InsertOutcome> {
        let range = self.selection.range();
        let outcome = self.place(attachment, range.clone(), ChangeOrigin::Programmatic)?;
        if outcome.is_inserted() {
            self.set_selection_unchecked(Selection::caret(range.start + 1));
        }
        Ok(outcome)
    }

    /// Replace `range` with `attachment`, moving the caret to the end.
    pub fn replace(&mut self, attachment: Attachment, range: Range<usize>) -> Result<InsertOutcome> {
        let outcome = self.place(attachment, range, ChangeOrigin::Programmatic)?;
        if outcome.is_inserted() {
            self.set_selection_unchecked(Selection::caret(self.buffer.len()));
        }
        Ok(outcome)
    }

    /// Remove the attachment `id`, handing it back detached.
    ///
    /// Returns `None` when it is not in the buffer.
    pub fn remove(&mut self, id: AttachmentId) -> Option<Attachment> {
        let marker = self.marker_range(id)?;
        let removed = self.bracketed(ChangeOrigin::Programmatic, |this| {
            this.buffer.remove_attachment_marker(marker.clone())?;
            this.buffer.replace(marker.clone(), "")?;
            Ok(this.unregister(id))
        });
        let removed = removed.ok().flatten()?;
        self.map_selection(&marker, 0);
        tracing::debug!(target: "tagtext.container", attachment = %id, "attachment_removed");
        Some(removed)
    }

    /// Remove the first attachment wrapping `widget`.
    pub fn remove_widget(&mut self, widget: WidgetId) -> Option<Attachment> {
        let id = self.registry.find_by_widget(widget)?;
        self.remove(id)
    }

    /// Let the host mutate a widget, then pick up its new size.
    ///
    /// Returns `false` when no live attachment wraps `widget`.
    pub fn update_widget(&mut self, widget: WidgetId, f: impl FnOnce(&mut dyn Widget)) -> bool {
        let Some(id) = self.registry.find_by_widget(widget) else {
            return false;
        };
        let Some(attachment) = self.registry.get_mut(id) else {
            return false;
        };
        f(attachment.widget_mut());
        if attachment.refresh_size() {
            tracing::trace!(target: "tagtext.container", attachment = %id, "widget_resized");
            self.layout = None;
        }
        true
    }

    /// Delete every tag whose delete affordance fired.
    ///
    /// These deletions are user edits, so the attachment delegate may veto
    /// them. A vetoed request stays pending for the next flush. Returns how
    /// many attachments were removed.
    pub fn flush_delete_requests(&mut self) -> usize {
        let requested: Vec<AttachmentId> = self
            .registry
            .iter_mut()
            .filter_map(|attachment| {
                let requested = attachment.widget_mut().take_delete_request();
                requested.then_some(attachment.id())
            })
            .collect();

        let mut removed = 0;
        for id in requested {
            let Some(marker) = self.marker_range(id) else {
                continue;
            };
            if matches!(self.user_replace(marker, ""), Ok(true)) {
                removed += 1;
            } else if let Some(attachment) = self.registry.get_mut(id) {
                attachment.widget_mut().request_delete();
            }
        }
        removed
    }

    // ----- Selection and focus -----

    #[must_use]
    pub const fn selected_range(&self) -> Selection {
        self.selection
    }

    /// Set the selection. Fails without change when it leaves the buffer.
    pub fn set_selected_range(&mut self, selection: Selection) -> Result<()> {
        let len = self.buffer.len();
        if selection.start.checked_add(selection.length).is_none_or(|end| end > len) {
            let end = selection.start.saturating_add(selection.length);
            return Err(Error::out_of_bounds(&(selection.start..end), len));
        }
        self.set_selection_unchecked(selection);
        Ok(())
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Request focus. Granted unless the text delegate refuses.
    pub fn become_active(&mut self) -> bool {
        if self.active {
            return true;
        }
        if let Some(delegate) = self.text_delegate.as_mut() {
            if !delegate.should_begin_editing() {
                return false;
            }
        }
        self.active = true;
        if let Some(delegate) = self.text_delegate.as_mut() {
            delegate.did_begin_editing();
        }
        true
    }

    /// Give up focus. Refused when the text delegate refuses.
    pub fn resign_active(&mut self) -> bool {
        if !self.active {
            return true;
        }
        if let Some(delegate) = self.text_delegate.as_mut() {
            if !delegate.should_end_editing() {
                return false;
            }
        }
        self.active = false;
        if let Some(delegate) = self.text_delegate.as_mut() {
            delegate.did_end_editing();
        }
        true
    }

    // ----- Typing attributes and geometry -----

    /// Font for new text; also applied to the selection.
    pub fn set_font(&mut self, font: Font) -> Result<()> {
        self.typing_attributes.font = Some(font.clone());
        self.restyle(&Attributes::new().with_font(font))
    }

    /// Paragraph style for new text; also applied to the selection.
    pub fn set_paragraph_style(&mut self, paragraph: ParagraphStyle) -> Result<()> {
        self.typing_attributes.paragraph = Some(paragraph);
        self.restyle(&Attributes::new().with_paragraph(paragraph))
    }

    #[must_use]
    pub const fn typing_attributes(&self) -> &Attributes {
        &self.typing_attributes
    }

    #[must_use]
    pub const fn text_container_inset(&self) -> EdgeInsets {
        self.options.inset
    }

    pub fn set_text_container_inset(&mut self, inset: EdgeInsets) {
        if self.options.inset != inset {
            self.options.inset = inset;
            self.layout = None;
        }
    }

    /// Resize the edit surface.
    pub fn set_width(&mut self, width: u32) {
        if self.options.width != width {
            self.options.width = width;
            self.layout = None;
        }
    }

    // ----- User edit surface -----

    /// Type or paste `text` over the selection.
    ///
    /// Placeholder characters are stripped from `text`. Returns `Ok(false)`
    /// when the attachment delegate vetoed deleting selected attachments.
    pub fn insert_text(&mut self, text: &str) -> Result<bool> {
        let range = self.selection.range();
        self.user_replace(range, &strip_placeholders(text))
    }

    /// Replace `range` with `text` as a user edit.
    pub fn replace_characters(&mut self, range: Range<usize>, text: &str) -> Result<bool> {
        self.user_replace(range, &strip_placeholders(text))
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn delete_backward(&mut self) -> Result<bool> {
        let range = if self.selection.is_collapsed() {
            let caret = self.selection.start;
            if caret == 0 {
                return Ok(false);
            }
            self.buffer.prev_grapheme_boundary(caret)..caret
        } else {
            self.selection.range()
        };
        self.user_replace(range, "")
    }

    /// Delete the selection, or the grapheme after the caret.
    pub fn delete_forward(&mut self) -> Result<bool> {
        let range = if self.selection.is_collapsed() {
            let caret = self.selection.start;
            if caret >= self.buffer.len() {
                return Ok(false);
            }
            caret..self.buffer.next_grapheme_boundary(caret)
        } else {
            self.selection.range()
        };
        self.user_replace(range, "")
    }

    /// Replace the whole content programmatically. Never tokenized.
    ///
    /// Attachments in the old content are deleted through the attachment
    /// delegate; returns `Ok(false)` on veto.
    pub fn set_text(&mut self, text: &str) -> Result<bool> {
        let range = 0..self.buffer.len();
        let text = strip_placeholders(text);
        let applied = self.bracketed(ChangeOrigin::Programmatic, |this| {
            if !this.intercept(&range)? {
                return Ok(false);
            }
            this.buffer.replace(range.clone(), &text)?;
            this.style_inserted(range.start, text.chars().count())?;
            Ok(true)
        })?;
        if applied {
            self.set_selection_unchecked(Selection::caret(self.buffer.len()));
        }
        Ok(applied)
    }

    /// Text of `range` with each tag rendered as its export text.
    pub fn export_text(&self, range: Range<usize>) -> Result<String> {
        check_range(&range, self.buffer.len())?;
        let mut out = String::new();
        for (offset, ch) in (range.start..).zip(self.buffer.rope().chars_in(range)) {
            let attachment = (ch == PLACEHOLDER)
                .then(|| self.buffer.attributes_at(offset).attachment)
                .flatten()
                .and_then(|id| self.registry.get(id));
            match attachment {
                Some(attachment) => out.push_str(&attachment.export_text()),
                None => out.push(ch),
            }
        }
        Ok(out)
    }

    // ----- Layout -----

    /// Compute layout if stale and position every widget.
    pub fn layout_if_needed(&mut self) -> &TextLayout {
        if self.layout.is_none() {
            let len = self.buffer.len();
            self.run_layout(0..len);
        }
        self.current_layout()
    }

    /// Lay out and position widgets whose markers fall in `range`.
    ///
    /// Returns how many of those widgets are visible.
    pub fn draw_glyphs(&mut self, range: Range<usize>) -> Result<usize> {
        check_range(&range, self.buffer.len())?;
        Ok(self.run_layout(range))
    }

    /// Line fragments in text-container coordinates.
    pub fn line_fragments(&mut self) -> &[LineFragment] {
        self.layout_if_needed().line_fragments()
    }

    /// Rectangle of the glyph at `offset` in surface coordinates.
    pub fn glyph_rect(&mut self, offset: usize) -> Option<Rect> {
        let origin = self.text_container_origin();
        self.layout_if_needed()
            .glyph_rect(offset)
            .map(|rect| rect.offset_by(origin))
    }

    /// Size of the laid out content including insets.
    pub fn content_size(&mut self) -> Size {
        let inset = self.options.inset;
        let width = self.options.width;
        let size = self.layout_if_needed().content_size();
        Size::new(width, size.height.saturating_add(inset.vertical()))
    }

    fn text_container_origin(&self) -> Point {
        Point::new(self.options.inset.left, self.options.inset.top)
    }

    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            width: self.options.width.saturating_sub(self.options.inset.horizontal()),
            line_fragment_padding: self.options.line_fragment_padding,
            defaults: Attributes::new()
                .with_font(self.options.font.clone())
                .with_paragraph(self.options.paragraph),
            width_method: self.options.width_method,
        }
    }

    fn run_layout(&mut self, range: Range<usize>) -> usize {
        let config = self.layout_config();
        let origin = self.text_container_origin();
        let layout = self
            .layout
            .get_or_insert_with(|| TextLayout::compute(&self.buffer, &self.registry, &config));
        LayoutPass::new(layout, origin).draw_glyphs(&self.buffer, &mut self.registry, range)
    }

    fn current_layout(&mut self) -> &TextLayout {
        let config = self.layout_config();
        self.layout
            .get_or_insert_with(|| TextLayout::compute(&self.buffer, &self.registry, &config))
    }

    // ----- Internals -----

    /// Run `f` inside an edit bracket, then publish and drain.
    fn bracketed<T>(
        &mut self,
        origin: ChangeOrigin,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.buffer.begin_editing_as(origin);
        let result = f(self);
        self.buffer.end_editing();
        self.publish_changes();
        self.drain_work();
        result
    }

    fn place(
        &mut self,
        attachment: Attachment,
        range: Range<usize>,
        origin: ChangeOrigin,
    ) -> Result<InsertOutcome> {
        check_range(&range, self.buffer.len())?;
        self.bracketed(origin, |this| {
            if !this.intercept(&range)? {
                tracing::debug!(
                    target: "tagtext.container",
                    attachment = %attachment.id(),
                    "insert_vetoed"
                );
                return Ok(InsertOutcome::Vetoed(attachment));
            }
            let id = attachment.id();
            let attributes = this.typing_attributes.clone().with_attachment(id);
            this.buffer.replace(range.clone(), PLACEHOLDER_STR)?;
            this.buffer
                .set_attributes(&attributes, range.start..range.start + 1)?;

            let mut attachment = attachment;
            attachment.refresh_size();
            attachment.mount_hidden();
            this.registry.insert(attachment);
            tracing::debug!(
                target: "tagtext.container",
                attachment = %id,
                offset = range.start,
                ?origin,
                "attachment_inserted"
            );
            Ok(InsertOutcome::Inserted(id))
        })
    }

    fn user_replace(&mut self, range: Range<usize>, text: &str) -> Result<bool> {
        check_range(&range, self.buffer.len())?;
        let inserted = text.chars().count();
        let applied = self.bracketed(ChangeOrigin::User, |this| {
            if !this.intercept(&range)? {
                return Ok(false);
            }
            this.buffer.replace(range.clone(), text)?;
            this.style_inserted(range.start, inserted)?;
            this.set_selection_unchecked(Selection::caret(range.start + inserted));
            Ok(true)
        })?;
        Ok(applied)
    }

    fn style_inserted(&mut self, start: usize, inserted: usize) -> Result<()> {
        if inserted == 0 {
            return Ok(());
        }
        self.buffer
            .set_attributes(&self.typing_attributes, start..start + inserted)
    }

    fn restyle(&mut self, attributes: &Attributes) -> Result<()> {
        let range = self.selection.range();
        if range.is_empty() {
            return Ok(());
        }
        self.bracketed(ChangeOrigin::Programmatic, |this| {
            this.buffer.add_attributes(attributes, range)
        })
    }

    /// Delete the attachments whose markers intersect `range`.
    ///
    /// Returns `false` without changing anything when the attachment
    /// delegate declines.
    fn intercept(&mut self, range: &Range<usize>) -> Result<bool> {
        let doomed: Vec<AttachmentId> = self
            .buffer
            .attachment_markers(range.clone())
            .map(|(id, _)| id)
            .collect();
        if doomed.is_empty() {
            return Ok(true);
        }

        if let Some(delegate) = self.attachment_delegate.as_mut() {
            let attachments: Vec<&Attachment> = doomed
                .iter()
                .filter_map(|&id| self.registry.get(id))
                .collect();
            if !delegate.should_delete_attachments(&attachments) {
                tracing::debug!(
                    target: "tagtext.container",
                    count = doomed.len(),
                    "deletion_vetoed"
                );
                return Ok(false);
            }
        }

        for id in doomed {
            if let Some(delegate) = self.attachment_delegate.as_mut() {
                if let Some(attachment) = self.registry.get(id) {
                    delegate.will_delete_attachment(attachment);
                }
            }
            if let Some(marker) = self.marker_range(id) {
                self.buffer.remove_attachment_marker(marker)?;
            }
            if let Some(attachment) = self.unregister(id) {
                if let Some(delegate) = self.attachment_delegate.as_mut() {
                    delegate.did_delete_attachment(&attachment);
                }
                tracing::debug!(target: "tagtext.container", attachment = %id, "attachment_deleted");
            }
        }
        Ok(true)
    }

    fn unregister(&mut self, id: AttachmentId) -> Option<Attachment> {
        let mut attachment = self.registry.remove(id)?;
        attachment.detach();
        Some(attachment)
    }

    fn marker_range(&self, id: AttachmentId) -> Option<Range<usize>> {
        self.buffer
            .attachment_markers(0..self.buffer.len())
            .find(|(marker, _)| *marker == id)
            .map(|(_, range)| range)
    }

    fn set_selection_unchecked(&mut self, selection: Selection) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        if let Some(delegate) = self.text_delegate.as_mut() {
            delegate.selection_did_change(selection);
        }
    }

    fn map_selection(&mut self, range: &Range<usize>, inserted: usize) {
        let mapped = self.selection.map(range, inserted);
        self.set_selection_unchecked(mapped);
    }

    /// Turn published buffer changes into notifications and queued work.
    fn publish_changes(&mut self) {
        for change in self.buffer.take_changes() {
            self.layout = None;
            if change.origin == ChangeOrigin::User {
                if let Some(delegate) = self.text_delegate.as_mut() {
                    delegate.text_did_change(&change);
                }
            }
            if self.options.auto_tokenize
                && Tokenizer::wants(&change)
                && !self.work.contains(&Job::Tokenize)
            {
                self.work.push_back(Job::Tokenize);
            }
        }
    }

    fn drain_work(&mut self) {
        if self.draining {
            return;
        }
        self.draining = true;
        let mut processed = 0;
        while let Some(job) = self.work.pop_front() {
            if processed == MAX_WORK_ITEMS {
                tracing::warn!(
                    target: "tagtext.container",
                    dropped = self.work.len() + 1,
                    "work_queue_exhausted"
                );
                self.work.clear();
                break;
            }
            processed += 1;
            match job {
                Job::Tokenize => self.tokenize_pass(),
            }
        }
        self.draining = false;
    }

    /// Promote every qualifying word, right to left.
    fn tokenize_pass(&mut self) {
        let tokens = Tokenizer::scan(&self.buffer.text());
        if tokens.is_empty() {
            return;
        }
        tracing::trace!(target: "tagtext.tokenizer", count = tokens.len(), "tokenize_pass");
        for token in tokens.iter().rev() {
            let attachment = self.tokenizer.attachment_for(token);
            match self.place(attachment, token.range.clone(), ChangeOrigin::Tokenizer) {
                Ok(InsertOutcome::Inserted(id)) => {
                    self.map_selection(&token.range, 1);
                    tracing::debug!(
                        target: "tagtext.tokenizer",
                        word = %token.word,
                        attachment = %id,
                        "word_promoted"
                    );
                }
                Ok(InsertOutcome::Vetoed(_)) => {}
                Err(err) => {
                    tracing::warn!(target: "tagtext.tokenizer", error = %err, "promotion_failed");
                }
            }
        }
    }
}

fn strip_placeholders(text: &str) -> String {
    text.chars().filter(|&ch| ch != PLACEHOLDER).collect()
}
