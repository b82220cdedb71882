//! Line breaking and glyph placement for attributed text.
//!
//! [`TextLayout`] turns a [`TextBuffer`] into line fragments and glyph boxes
//! in text-container coordinates (cells). Text is measured per grapheme
//! cluster with Unicode display width; every attachment placeholder is a
//! single unbreakable glyph sized by its widget. [`LayoutPass`] uses the
//! result to pin widgets to their placeholders.

// Line breaking reads best as one function
#![allow(clippy::too_many_lines)]

mod pass;

pub use pass::LayoutPass;

use crate::attachment::{AttachmentRegistry, PLACEHOLDER};
use crate::geometry::{Rect, Size};
use crate::style::{Attributes, ParagraphStyle, WrapMode};
use crate::text::TextBuffer;
use crate::unicode::{WidthMethod, graphemes};
use std::ops::Range;

/// Tab stops every this many cells.
pub const TAB_WIDTH: u32 = 4;

/// Inputs to a layout computation besides the buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Width of the text container in cells (surface width minus insets).
    pub width: u32,
    /// Horizontal padding inside every line fragment.
    pub line_fragment_padding: u32,
    /// Attributes for chars without a font or paragraph style.
    pub defaults: Attributes,
    pub width_method: WidthMethod,
}

impl LayoutConfig {
    /// Width available to glyphs on one line.
    #[must_use]
    pub fn available_width(&self) -> u32 {
        self.width
            .saturating_sub(self.line_fragment_padding.saturating_mul(2))
    }
}

/// One laid out line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineFragment {
    /// Chars on this line, including a trailing newline.
    pub range: Range<usize>,
    /// Line box in text-container coordinates. Spans the container width.
    pub rect: Rect,
    /// Cells occupied by glyphs, padding excluded.
    pub used_width: u32,
}

/// Placement of one grapheme cluster or attachment glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBox {
    pub range: Range<usize>,
    pub x: u32,
    pub width: u32,
    /// Index into [`TextLayout::line_fragments`].
    pub line: usize,
}

#[derive(Clone, Debug)]
struct Item {
    range: Range<usize>,
    width: u32,
    height: u32,
    kind: ItemKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemKind {
    Text,
    Whitespace,
    Newline,
    Attachment,
}

/// Laid out text: line fragments plus a glyph box per cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextLayout {
    lines: Vec<LineFragment>,
    glyphs: Vec<GlyphBox>,
    width: u32,
    padding: u32,
    len: usize,
}

impl TextLayout {
    /// Lay out `buffer`. Attachment sizes come from `registry`.
    #[must_use]
    pub fn compute(
        buffer: &TextBuffer,
        registry: &AttachmentRegistry,
        config: &LayoutConfig,
    ) -> Self {
        let items = measure(buffer, registry, config);
        let mut layout = Self {
            lines: Vec::new(),
            glyphs: Vec::with_capacity(items.len()),
            width: config.width,
            padding: config.line_fragment_padding,
            len: buffer.len(),
        };

        let mut y = 0u32;
        let mut para_start = 0usize;
        while para_start <= items.len() {
            let para_end = items[para_start..]
                .iter()
                .position(|item| item.kind == ItemKind::Newline)
                .map_or(items.len(), |idx| para_start + idx + 1);

            let first_char = items
                .get(para_start)
                .map_or(buffer.len(), |item| item.range.start);
            let paragraph = paragraph_at(buffer, config, first_char);

            for line in break_lines(&items[para_start..para_end], paragraph.wrap_mode, config) {
                let line = para_start + line.start..para_start + line.end;
                let height = layout.place_line(&items[line], y, config, first_char);
                y = y.saturating_add(height).saturating_add(paragraph.line_spacing);
            }

            if para_end == items.len() {
                // A trailing newline opens one more, empty line.
                if items.last().is_some_and(|item| item.kind == ItemKind::Newline) {
                    let height = config.defaults.line_height();
                    layout.push_empty_line(buffer.len(), y, height);
                }
                break;
            }
            para_start = para_end;
        }

        tracing::trace!(
            target: "tagtext.layout",
            lines = layout.lines.len(),
            glyphs = layout.glyphs.len(),
            width = config.width,
            "layout_computed"
        );
        layout
    }

    /// All line fragments, top to bottom.
    #[must_use]
    pub fn line_fragments(&self) -> &[LineFragment] {
        &self.lines
    }

    /// All glyph boxes, in buffer order.
    #[must_use]
    pub fn glyphs(&self) -> &[GlyphBox] {
        &self.glyphs
    }

    /// Line fragment holding `offset`; the end of the buffer maps to the last line.
    #[must_use]
    pub fn line_for_offset(&self, offset: usize) -> Option<&LineFragment> {
        if offset >= self.len {
            return self.lines.last();
        }
        self.glyph_index(offset)
            .and_then(|idx| self.lines.get(self.glyphs[idx].line))
    }

    /// Rectangle of the glyph holding `offset`: its advance by its line box.
    #[must_use]
    pub fn glyph_rect(&self, offset: usize) -> Option<Rect> {
        let glyph = &self.glyphs[self.glyph_index(offset)?];
        let line = &self.lines[glyph.line];
        Some(Rect::new(glyph.x, line.rect.y, glyph.width, line.rect.height))
    }

    /// Smallest rectangle enclosing the glyphs of `range`.
    #[must_use]
    pub fn bounding_rect(&self, range: Range<usize>) -> Option<Rect> {
        let first = self.glyphs.partition_point(|g| g.range.end <= range.start);
        let mut rects = self.glyphs[first..]
            .iter()
            .take_while(|g| g.range.start < range.end)
            .map(|g| {
                let line = &self.lines[g.line];
                Rect::new(g.x, line.rect.y, g.width, line.rect.height)
            });
        let head = rects.next()?;
        Some(rects.fold(head, union))
    }

    /// Caret position before the char at `offset` (top of its line box).
    #[must_use]
    pub fn caret_position(&self, offset: usize) -> (u32, u32) {
        if let Some(rect) = self.glyph_rect(offset) {
            return (rect.x, rect.y);
        }
        let Some(line) = self.lines.last() else {
            return (self.padding, 0);
        };
        let last_line = self.lines.len() - 1;
        let x = self
            .glyphs
            .last()
            .filter(|g| g.line == last_line)
            .map_or(self.padding, |g| g.x + g.width);
        (x, line.rect.y)
    }

    /// Size of the laid out text: container width by total height.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let height = self.lines.last().map_or(0, |line| line.rect.max_y());
        Size::new(self.width, height)
    }

    fn glyph_index(&self, offset: usize) -> Option<usize> {
        let idx = self.glyphs.partition_point(|g| g.range.end <= offset);
        self.glyphs
            .get(idx)
            .filter(|g| g.range.contains(&offset))
            .map(|_| idx)
    }

    fn place_line(&mut self, items: &[Item], y: u32, config: &LayoutConfig, fallback: usize) -> u32 {
        let line_idx = self.lines.len();
        let padding = config.line_fragment_padding;
        let mut x = padding;
        let mut height = 0;
        for item in items {
            self.glyphs.push(GlyphBox {
                range: item.range.clone(),
                x,
                width: item.width,
                line: line_idx,
            });
            x = x.saturating_add(item.width);
            height = height.max(item.height);
        }
        if height == 0 {
            height = config.defaults.line_height();
        }
        let range = match (items.first(), items.last()) {
            (Some(first), Some(last)) => first.range.start..last.range.end,
            _ => fallback..fallback,
        };
        self.lines.push(LineFragment {
            range,
            rect: Rect::new(0, y, self.width, height),
            used_width: x - padding,
        });
        height
    }

    fn push_empty_line(&mut self, offset: usize, y: u32, height: u32) {
        self.lines.push(LineFragment {
            range: offset..offset,
            rect: Rect::new(0, y, self.width, height),
            used_width: 0,
        });
    }
}

fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    Rect::new(x, y, a.max_x().max(b.max_x()) - x, a.max_y().max(b.max_y()) - y)
}

fn paragraph_at(buffer: &TextBuffer, config: &LayoutConfig, offset: usize) -> ParagraphStyle {
    buffer
        .attributes_at(offset)
        .paragraph
        .or(config.defaults.paragraph)
        .unwrap_or_default()
}

/// Split `text` into measured layout items.
fn measure(buffer: &TextBuffer, registry: &AttachmentRegistry, config: &LayoutConfig) -> Vec<Item> {
    let text = buffer.text();
    let mut items = Vec::new();
    let mut offset = 0usize;
    let mut col = 0u32;

    for segment in text.split_inclusive(PLACEHOLDER) {
        let (plain, has_placeholder) = match segment.strip_suffix(PLACEHOLDER) {
            Some(plain) => (plain, true),
            None => (segment, false),
        };

        for grapheme in graphemes(plain) {
            let chars = grapheme.chars().count();
            let range = offset..offset + chars;
            let height = config
                .defaults
                .merge(&buffer.attributes_at(offset))
                .line_height();
            let (kind, width) = if grapheme.contains('\n') {
                col = 0;
                (ItemKind::Newline, 0)
            } else if grapheme == "\t" {
                let width = TAB_WIDTH - col % TAB_WIDTH;
                (ItemKind::Whitespace, width)
            } else if grapheme.chars().all(char::is_whitespace) {
                (ItemKind::Whitespace, config.width_method.cells(grapheme))
            } else {
                (ItemKind::Text, config.width_method.cells(grapheme))
            };
            col = col.wrapping_add(width);
            items.push(Item {
                range,
                width,
                height,
                kind,
            });
            offset += chars;
        }

        if has_placeholder {
            let item = measure_placeholder(buffer, registry, config, offset);
            col = col.wrapping_add(item.width);
            items.push(item);
            offset += 1;
        }
    }

    items
}

fn measure_placeholder(
    buffer: &TextBuffer,
    registry: &AttachmentRegistry,
    config: &LayoutConfig,
    offset: usize,
) -> Item {
    let attributes = buffer.attributes_at(offset);
    let attachment = attributes.attachment.and_then(|id| registry.get(id));
    let (width, height) = match attachment {
        Some(attachment) if attachment.is_full_width() => {
            let available = config.available_width();
            let width = if available == 0 {
                attachment.size().width
            } else {
                available
            };
            (width, attachment.size().height)
        }
        Some(attachment) => (attachment.size().width, attachment.size().height),
        // A stray placeholder renders like any other one-cell glyph.
        None => (1, config.defaults.merge(&attributes).line_height()),
    };
    Item {
        range: offset..offset + 1,
        width,
        height,
        kind: if attachment.is_some() {
            ItemKind::Attachment
        } else {
            ItemKind::Text
        },
    }
}

/// Break one paragraph's items into lines (item index ranges).
fn break_lines(items: &[Item], mode: WrapMode, config: &LayoutConfig) -> Vec<Range<usize>> {
    let available = match mode {
        WrapMode::None => None,
        WrapMode::Char | WrapMode::Word => Some(config.available_width()).filter(|&w| w > 0),
    };

    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut x = 0u32;
    let mut last_break: Option<usize> = None;
    let mut i = 0usize;

    while i < items.len() {
        let item = &items[i];
        let breakable = !matches!(item.kind, ItemKind::Whitespace | ItemKind::Newline);

        if let Some(available) = available {
            if breakable && x > 0 && x.saturating_add(item.width) > available {
                let brk = match mode {
                    WrapMode::Word => last_break.filter(|&b| b > start).unwrap_or(i),
                    _ => i,
                };
                lines.push(start..brk);
                start = brk;
                x = 0;
                last_break = None;
                i = brk;
                continue;
            }
        }

        x = x.saturating_add(item.width);
        if matches!(item.kind, ItemKind::Whitespace | ItemKind::Attachment) {
            last_break = Some(i + 1);
        }
        i += 1;
    }

    if start < items.len() || lines.is_empty() {
        lines.push(start..items.len());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::{Attachment, PLACEHOLDER_STR};
    use crate::geometry::Point;
    use crate::style::Font;
    use crate::widget::TagWidget;

    fn config(width: u32) -> LayoutConfig {
        LayoutConfig {
            width,
            ..LayoutConfig::default()
        }
    }

    fn dump(layout: &TextLayout) -> String {
        layout
            .line_fragments()
            .iter()
            .map(|line| {
                format!(
                    "{:?} y={} h={} used={}",
                    line.range, line.rect.y, line.rect.height, line.used_width
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn with_tag(text: &str, offset: usize, widget: TagWidget) -> (TextBuffer, AttachmentRegistry) {
        let mut buffer = TextBuffer::with_text(text);
        let attachment = Attachment::new(widget);
        buffer
            .set_attributes(&Attributes::new().with_attachment(attachment.id()), offset..offset + 1)
            .unwrap();
        let mut registry = AttachmentRegistry::new();
        registry.insert(attachment);
        (buffer, registry)
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buffer = TextBuffer::new();
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config(10));
        assert_eq!(layout.line_fragments().len(), 1);
        assert_eq!(layout.line_fragments()[0].range, 0..0);
        assert_eq!(layout.content_size(), Size::new(10, 1));
        assert_eq!(layout.caret_position(0), (0, 0));
    }

    #[test]
    fn test_newlines_split_lines() {
        let buffer = TextBuffer::with_text("ab\ncd\n");
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config(10));
        let ranges: Vec<_> = layout.line_fragments().iter().map(|l| l.range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..6]);
        assert_eq!(layout.caret_position(6), (0, 2));
        assert_eq!(layout.caret_position(4), (1, 1));
    }

    #[test]
    fn test_word_wrap_snapshot() {
        let buffer = TextBuffer::with_text("hello world\nfoo");
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config(8));
        insta::assert_snapshot!(dump(&layout), @r"
        0..6 y=0 h=1 used=6
        6..12 y=1 h=1 used=5
        12..15 y=2 h=1 used=3
        ");
    }

    #[test]
    fn test_char_wrap() {
        let mut buffer = TextBuffer::with_text("abcdef");
        let para = ParagraphStyle::default().with_wrap_mode(WrapMode::Char);
        buffer
            .set_attributes(&Attributes::new().with_paragraph(para), 0..6)
            .unwrap();
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config(4));
        let ranges: Vec<_> = layout.line_fragments().iter().map(|l| l.range.clone()).collect();
        assert_eq!(ranges, vec![0..4, 4..6]);
    }

    #[test]
    fn test_no_wrap_overflows() {
        let buffer = TextBuffer::with_text("hello world");
        let config = LayoutConfig {
            width: 4,
            defaults: Attributes::new()
                .with_paragraph(ParagraphStyle::default().with_wrap_mode(WrapMode::None)),
            ..LayoutConfig::default()
        };
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config);
        assert_eq!(layout.line_fragments().len(), 1);
        assert_eq!(layout.line_fragments()[0].used_width, 11);
    }

    #[test]
    fn test_wide_glyphs() {
        let buffer = TextBuffer::with_text("日本a");
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config(10));
        assert_eq!(layout.glyph_rect(1), Some(Rect::new(2, 0, 2, 1)));
        assert_eq!(layout.glyph_rect(2), Some(Rect::new(4, 0, 1, 1)));
        assert_eq!(layout.glyph_rect(3), None);
    }

    #[test]
    fn test_tabs_expand_to_stops() {
        let buffer = TextBuffer::with_text("a\tb");
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config(20));
        assert_eq!(layout.glyph_rect(1), Some(Rect::new(1, 0, 3, 1)));
        assert_eq!(layout.glyph_rect(2), Some(Rect::new(4, 0, 1, 1)));
    }

    #[test]
    fn test_attachment_glyph_uses_widget_size() {
        let text = format!("a{PLACEHOLDER_STR}b");
        let (buffer, registry) = with_tag(&text, 1, TagWidget::new("foo").with_height(2));
        let layout = TextLayout::compute(&buffer, &registry, &config(20));

        assert_eq!(layout.glyph_rect(1), Some(Rect::new(1, 0, 8, 2)));
        assert_eq!(layout.glyph_rect(2), Some(Rect::new(9, 0, 1, 2)));
        assert_eq!(layout.content_size(), Size::new(20, 2));
    }

    #[test]
    fn test_widget_frame_is_bottom_aligned() {
        let text = format!("a{PLACEHOLDER_STR}");
        let (mut buffer, registry) = with_tag(&text, 1, TagWidget::new("foo"));
        let tall = Attributes::new().with_font(Font::new("big", 3));
        buffer.set_attributes(&tall, 0..1).unwrap();
        let layout = TextLayout::compute(&buffer, &registry, &config(20));

        let pass = LayoutPass::new(&layout, Point::new(2, 1));
        assert_eq!(
            pass.widget_frame(1, Size::new(8, 1)),
            Some(Rect::new(3, 3, 8, 1))
        );
    }

    #[test]
    fn test_full_width_attachment_takes_own_line() {
        let text = format!("a{PLACEHOLDER_STR}b");
        let mut buffer = TextBuffer::with_text(&text);
        let attachment = Attachment::new(TagWidget::new("foo")).with_full_width(true);
        buffer
            .set_attributes(&Attributes::new().with_attachment(attachment.id()), 1..2)
            .unwrap();
        let mut registry = AttachmentRegistry::new();
        registry.insert(attachment);

        let config = LayoutConfig {
            width: 20,
            line_fragment_padding: 1,
            ..LayoutConfig::default()
        };
        let layout = TextLayout::compute(&buffer, &registry, &config);
        let ranges: Vec<_> = layout.line_fragments().iter().map(|l| l.range.clone()).collect();
        assert_eq!(ranges, vec![0..1, 1..2, 2..3]);
        assert_eq!(layout.glyph_rect(1), Some(Rect::new(1, 1, 18, 1)));
    }

    #[test]
    fn test_line_spacing() {
        let mut buffer = TextBuffer::with_text("a\nb");
        let para = ParagraphStyle::default().with_line_spacing(1);
        buffer
            .set_attributes(&Attributes::new().with_paragraph(para), 0..3)
            .unwrap();
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config(10));
        assert_eq!(layout.line_fragments()[1].rect.y, 2);
        assert_eq!(layout.content_size(), Size::new(10, 3));
    }

    #[test]
    fn test_bounding_rect_spans_glyphs() {
        let buffer = TextBuffer::with_text("abcd");
        let layout = TextLayout::compute(&buffer, &AttachmentRegistry::new(), &config(10));
        assert_eq!(layout.bounding_rect(1..3), Some(Rect::new(1, 0, 2, 1)));
        assert_eq!(layout.bounding_rect(4..4), None);
    }
}
