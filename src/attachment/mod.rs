//! Attachments: widgets embedded in the text buffer.
//!
//! An [`Attachment`] owns its widget for as long as its placeholder character
//! sits in the buffer. Whether the widget is shown is tracked explicitly by
//! [`Mount`]; the layout pass is the only thing that reveals a widget.

mod registry;

pub use registry::AttachmentRegistry;

use crate::geometry::{Rect, Size};
use crate::widget::{Widget, WidgetId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The textual stand-in for every attachment (OBJECT REPLACEMENT CHARACTER).
pub const PLACEHOLDER: char = '\u{fffc}';

/// [`PLACEHOLDER`] as a string slice.
pub const PLACEHOLDER_STR: &str = "\u{fffc}";

/// Stable attachment identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentId(u64);

impl AttachmentId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attachment#{}", self.0)
    }
}

/// Where an attachment's widget currently stands in the edit surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mount {
    /// Not part of the edit surface.
    #[default]
    Detached,
    /// Mounted but not yet positioned by a layout pass.
    Hidden,
    /// Positioned and shown at the given frame.
    Visible(Rect),
}

/// A widget embedded in text as a single placeholder character.
pub struct Attachment {
    id: AttachmentId,
    widget: Box<dyn Widget>,
    size: Size,
    placeholder_text: Option<String>,
    full_width: bool,
    mount: Mount,
}

impl Attachment {
    /// Wrap a widget. The widget's size is read once here.
    #[must_use]
    pub fn new(widget: impl Widget + 'static) -> Self {
        Self::from_boxed(Box::new(widget))
    }

    /// Wrap an already boxed widget.
    #[must_use]
    pub fn from_boxed(widget: Box<dyn Widget>) -> Self {
        let size = widget.size();
        Self {
            id: AttachmentId::next(),
            widget,
            size,
            placeholder_text: None,
            full_width: false,
            mount: Mount::Detached,
        }
    }

    /// Set the fallback text used when exporting.
    #[must_use]
    pub fn with_placeholder_text(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = Some(text.into());
        self
    }

    /// Stretch to the available line width.
    #[must_use]
    pub const fn with_full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// The wrapped widget.
    #[must_use]
    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    /// Mutable access to the wrapped widget.
    ///
    /// Call [`refresh_size`](Self::refresh_size) afterwards if the widget's
    /// bounds may have changed.
    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        self.widget.as_mut()
    }

    /// Identity of the wrapped widget.
    #[must_use]
    pub fn widget_id(&self) -> WidgetId {
        self.widget.id()
    }

    /// Release the widget.
    #[must_use]
    pub fn into_widget(self) -> Box<dyn Widget> {
        self.widget
    }

    /// Cached widget bounds.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Re-read the widget bounds. Returns `true` if they changed.
    pub fn refresh_size(&mut self) -> bool {
        let size = self.widget.size();
        let changed = size != self.size;
        self.size = size;
        changed
    }

    #[must_use]
    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder_text.as_deref()
    }

    #[must_use]
    pub const fn is_full_width(&self) -> bool {
        self.full_width
    }

    #[must_use]
    pub const fn mount(&self) -> Mount {
        self.mount
    }

    /// Whether the widget is part of the edit surface (hidden or visible).
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        !matches!(self.mount, Mount::Detached)
    }

    /// Whether a layout pass has positioned and revealed the widget.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self.mount, Mount::Visible(_))
    }

    /// Frame assigned by the last layout pass.
    #[must_use]
    pub const fn frame(&self) -> Option<Rect> {
        match self.mount {
            Mount::Visible(rect) => Some(rect),
            _ => None,
        }
    }

    /// Text used when the widget cannot be rendered.
    #[must_use]
    pub fn export_text(&self) -> String {
        self.placeholder_text
            .as_deref()
            .or_else(|| self.widget.label())
            .map_or_else(|| PLACEHOLDER_STR.to_string(), str::to_string)
    }

    pub(crate) fn mount_hidden(&mut self) {
        self.mount = Mount::Hidden;
    }

    pub(crate) fn reveal(&mut self, frame: Rect) {
        self.mount = Mount::Visible(frame);
    }

    pub(crate) fn hide(&mut self) {
        if self.is_mounted() {
            self.mount = Mount::Hidden;
        }
    }

    pub(crate) fn detach(&mut self) {
        self.mount = Mount::Detached;
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("id", &self.id)
            .field("widget", &self.widget.id())
            .field("size", &self.size)
            .field("placeholder_text", &self.placeholder_text)
            .field("full_width", &self.full_width)
            .field("mount", &self.mount)
            .finish()
    }
}

impl PartialEq for Attachment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Attachment {}
