//! Container configuration.

use crate::geometry::EdgeInsets;
use crate::style::{Font, ParagraphStyle};
use crate::unicode::WidthMethod;

/// Default surface width in cells.
pub const DEFAULT_WIDTH: u32 = 80;

/// Options for creating a [`Container`](super::Container).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerOptions {
    /// Width of the edit surface in cells.
    pub width: u32,
    /// Inset of the text container inside the surface.
    pub inset: EdgeInsets,
    /// Horizontal padding inside every line fragment.
    pub line_fragment_padding: u32,
    /// Font for typed text and new placeholders.
    pub font: Font,
    /// Paragraph style for typed text and new placeholders.
    pub paragraph: ParagraphStyle,
    /// How glyph widths are measured.
    pub width_method: WidthMethod,
    /// Promote words to tags as the user types.
    pub auto_tokenize: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            inset: EdgeInsets::ZERO,
            line_fragment_padding: 0,
            font: Font::system(),
            paragraph: ParagraphStyle::default(),
            width_method: WidthMethod::default(),
            auto_tokenize: true,
        }
    }
}

impl ContainerOptions {
    #[must_use]
    pub const fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub const fn with_inset(mut self, inset: EdgeInsets) -> Self {
        self.inset = inset;
        self
    }

    #[must_use]
    pub const fn with_line_fragment_padding(mut self, padding: u32) -> Self {
        self.line_fragment_padding = padding;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub const fn with_paragraph(mut self, paragraph: ParagraphStyle) -> Self {
        self.paragraph = paragraph;
        self
    }

    #[must_use]
    pub const fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    /// Turn typing-driven tag promotion on or off.
    #[must_use]
    pub const fn with_auto_tokenize(mut self, enabled: bool) -> Self {
        self.auto_tokenize = enabled;
        self
    }
}
