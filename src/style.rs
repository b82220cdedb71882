//! Character attributes: font, paragraph style and attachment marker.
//!
//! This module provides the attribute values stored in a
//! [`TextBuffer`](crate::text::TextBuffer)'s attribute runs:
//!
//! - [`Font`]: typeface name and line height in cells
//! - [`ParagraphStyle`]: wrapping and line spacing
//! - [`Attributes`]: the full attribute set for a run of characters
//!
//! # Examples
//!
//! ```
//! use tagtext::{Attributes, Font, ParagraphStyle, WrapMode};
//!
//! let body = Attributes::new()
//!     .with_font(Font::system())
//!     .with_paragraph(ParagraphStyle::default().with_wrap_mode(WrapMode::Char));
//!
//! // Overlay values take precedence over base values.
//! let tall = body.merge(&Attributes::new().with_font(Font::new("display", 2)));
//! assert_eq!(tall.font.unwrap().line_height, 2);
//! ```

use crate::attachment::AttachmentId;
use std::borrow::Cow;

/// Line height used when no font is set.
pub const DEFAULT_LINE_HEIGHT: u32 = 1;

/// A terminal font: a family name and the height of one line box in cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: Cow<'static, str>,
    pub line_height: u32,
}

impl Font {
    /// Create a font.
    #[must_use]
    pub fn new(family: impl Into<Cow<'static, str>>, line_height: u32) -> Self {
        Self {
            family: family.into(),
            line_height: line_height.max(1),
        }
    }

    /// The default system font (one cell tall).
    #[must_use]
    pub const fn system() -> Self {
        Self {
            family: Cow::Borrowed("system"),
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system()
    }
}

/// Line breaking mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// No wrapping - lines extend beyond the container.
    None,
    /// Wrap at character boundaries.
    Char,
    /// Wrap at word boundaries. Attachments count as words.
    #[default]
    Word,
}

/// Paragraph-level layout attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParagraphStyle {
    pub wrap_mode: WrapMode,
    /// Extra rows inserted after every line fragment.
    pub line_spacing: u32,
}

impl ParagraphStyle {
    /// Set the wrap mode.
    #[must_use]
    pub const fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    /// Set the line spacing.
    #[must_use]
    pub const fn with_line_spacing(mut self, line_spacing: u32) -> Self {
        self.line_spacing = line_spacing;
        self
    }
}

/// Attributes applied to a run of characters.
///
/// A `None` field means "not set": layout falls back to the container's
/// defaults. The attachment marker is only ever set on a single placeholder
/// character.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    pub font: Option<Font>,
    pub paragraph: Option<ParagraphStyle>,
    pub attachment: Option<AttachmentId>,
}

impl Attributes {
    /// Empty attribute set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            font: None,
            paragraph: None,
            attachment: None,
        }
    }

    /// Set the font.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set the paragraph style.
    #[must_use]
    pub const fn with_paragraph(mut self, paragraph: ParagraphStyle) -> Self {
        self.paragraph = Some(paragraph);
        self
    }

    /// Set the attachment marker.
    #[must_use]
    pub const fn with_attachment(mut self, id: AttachmentId) -> Self {
        self.attachment = Some(id);
        self
    }

    /// Check if no attribute is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.font.is_none() && self.paragraph.is_none() && self.attachment.is_none()
    }

    /// Merge with another attribute set (`overlay` takes precedence).
    #[must_use]
    pub fn merge(&self, overlay: &Self) -> Self {
        Self {
            font: overlay.font.clone().or_else(|| self.font.clone()),
            paragraph: overlay.paragraph.or(self.paragraph),
            attachment: overlay.attachment.or(self.attachment),
        }
    }

    /// Line height of the font, or the default.
    #[must_use]
    pub fn line_height(&self) -> u32 {
        self.font
            .as_ref()
            .map_or(DEFAULT_LINE_HEIGHT, |font| font.line_height)
    }
}
