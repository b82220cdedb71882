//! Cell advances for graphemes and labels.

use unicode_width::UnicodeWidthStr;

/// How ambiguous-width characters are measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// Ambiguous characters take one cell, as with POSIX `wcwidth`.
    #[default]
    WcWidth,
    /// Ambiguous characters take two cells (East Asian contexts).
    Unicode,
}

impl WidthMethod {
    /// Cells covered by `text`, saturating at `u32::MAX`.
    #[must_use]
    pub fn cells(self, text: &str) -> u32 {
        let width = match self {
            Self::WcWidth => text.width(),
            Self::Unicode => text.width_cjk(),
        };
        u32::try_from(width).unwrap_or(u32::MAX)
    }
}

/// Cells covered by `text` under [`WidthMethod::WcWidth`].
#[must_use]
pub fn display_width(text: &str) -> u32 {
    WidthMethod::WcWidth.cells(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_widths() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("漢字"), 4);
        assert_eq!(display_width("😀"), 2);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_combining_mark_adds_nothing() {
        assert_eq!(display_width("e\u{0301}"), 1);
    }

    #[test]
    fn test_ambiguous_width_follows_method() {
        assert_eq!(WidthMethod::WcWidth.cells("①"), 1);
        assert_eq!(WidthMethod::Unicode.cells("①"), 2);
        assert_eq!(WidthMethod::Unicode.cells("a"), 1);
    }
}
