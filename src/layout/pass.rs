//! Widget placement over a computed layout.

use super::TextLayout;
use crate::attachment::AttachmentRegistry;
use crate::geometry::{Point, Rect, Size};
use crate::text::TextBuffer;
use std::ops::Range;

/// Positions attachment widgets on their placeholder glyphs.
///
/// Frames are in surface coordinates: the glyph rectangle offset by the
/// text container origin, bottom-aligned to the line box.
#[derive(Clone, Copy, Debug)]
pub struct LayoutPass<'a> {
    layout: &'a TextLayout,
    origin: Point,
}

impl<'a> LayoutPass<'a> {
    #[must_use]
    pub const fn new(layout: &'a TextLayout, origin: Point) -> Self {
        Self { layout, origin }
    }

    /// Frame for a widget of `size` sitting on the glyph at `offset`.
    #[must_use]
    pub fn widget_frame(&self, offset: usize, size: Size) -> Option<Rect> {
        let glyph = self.layout.glyph_rect(offset)?;
        let height = size.height.min(glyph.height);
        let frame = Rect::new(glyph.x, glyph.max_y() - height, glyph.width, height);
        Some(frame.offset_by(self.origin))
    }

    /// Frame and reveal every widget whose marker lies in `range`.
    ///
    /// Widgets with an empty size stay hidden. Returns how many widgets
    /// are visible afterwards.
    pub fn draw_glyphs(
        &self,
        buffer: &TextBuffer,
        registry: &mut AttachmentRegistry,
        range: Range<usize>,
    ) -> usize {
        let mut revealed = 0;
        for (id, marker) in buffer.attachment_markers(range) {
            let Some(attachment) = registry.get_mut(id) else {
                tracing::warn!(
                    target: "tagtext.layout",
                    attachment = %id,
                    offset = marker.start,
                    "marker_without_attachment"
                );
                continue;
            };
            if !attachment.is_mounted() {
                continue;
            }
            let size = attachment.size();
            match self.widget_frame(marker.start, size) {
                Some(frame) if !size.is_empty() && !frame.is_empty() => {
                    attachment.reveal(frame);
                    revealed += 1;
                }
                _ => attachment.hide(),
            }
        }
        tracing::trace!(target: "tagtext.layout", revealed, "draw_glyphs");
        revealed
    }
}
