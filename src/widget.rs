//! Widgets embedded in text through attachments.
//!
//! The container never draws widgets. It only needs a widget's identity, its
//! size in cells, and whether the user asked to delete it. [`TagWidget`] is
//! the stock pill-shaped tag produced by the tokenizer.

use crate::geometry::Size;
use crate::unicode::display_width;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique widget identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh identity.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

/// A self-sized visual unit that can be embedded in text.
pub trait Widget: fmt::Debug {
    /// Stable identity of this widget.
    fn id(&self) -> WidgetId;

    /// Current bounds in cells. A zero size keeps the widget hidden.
    fn size(&self) -> Size;

    /// Text the widget stands for, used when exporting text.
    fn label(&self) -> Option<&str> {
        None
    }

    /// The user activated the widget's delete affordance.
    fn request_delete(&mut self) {}

    /// Consume a pending "delete requested" signal.
    ///
    /// Returns `true` at most once per request.
    fn take_delete_request(&mut self) -> bool {
        false
    }
}

/// Cells taken by the pill caps, the gap and the delete button: `(#tag ×)`.
pub const TAG_CHROME_WIDTH: u32 = 4;

/// Pill-shaped tag with a delete affordance.
#[derive(Clone, Debug)]
pub struct TagWidget {
    id: WidgetId,
    tag: String,
    height: u32,
    delete_requested: bool,
}

impl TagWidget {
    /// Create a one-row tag for `tag`.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: WidgetId::next(),
            tag: tag.into(),
            height: 1,
            delete_requested: false,
        }
    }

    /// Set the height in rows.
    #[must_use]
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// The raw tag string.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The text shown inside the pill.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("#{}", self.tag)
    }

    /// Change the tag string; the width follows.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }
}

impl Widget for TagWidget {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn size(&self) -> Size {
        let label = display_width(&self.display_text());
        Size::new(label.saturating_add(TAG_CHROME_WIDTH), self.height)
    }

    fn label(&self) -> Option<&str> {
        Some(&self.tag)
    }

    fn request_delete(&mut self) {
        self.delete_requested = true;
    }

    fn take_delete_request(&mut self) -> bool {
        std::mem::take(&mut self.delete_requested)
    }
}
