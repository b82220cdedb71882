//! Fuzz target for container edit sequences.
//!
//! Applies arbitrary typing, tag insertion, deletion and selection changes
//! and checks that placeholders and live attachments stay one to one.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagtext::{Attachment, Container, ContainerOptions, PLACEHOLDER, Selection, TagWidget};

#[derive(Arbitrary, Debug)]
enum Op {
    Type(String),
    InsertTag(u8),
    Replace(u8, u8),
    DeleteBackward,
    DeleteForward,
    Select(u8, u8),
    Remove(u8),
    Width(u8),
}

#[derive(Arbitrary, Debug)]
struct Input {
    tokenize: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut container =
        Container::new(ContainerOptions::default().with_auto_tokenize(input.tokenize));

    for op in input.ops.iter().take(64) {
        let len = container.len();
        match op {
            Op::Type(text) => {
                let _ = container.insert_text(text);
            }
            Op::InsertTag(at) => {
                let at = usize::from(*at) % (len + 1);
                let _ = container.set_selected_range(Selection::caret(at));
                let _ = container.insert(Attachment::new(TagWidget::new("t")));
            }
            Op::Replace(start, end) => {
                // Out-of-range requests must fail cleanly.
                let range = usize::from(*start)..usize::from(*end);
                let _ = container.replace(Attachment::new(TagWidget::new("r")), range);
            }
            Op::DeleteBackward => {
                let _ = container.delete_backward();
            }
            Op::DeleteForward => {
                let _ = container.delete_forward();
            }
            Op::Select(start, length) => {
                let _ = container
                    .set_selected_range(Selection::new(usize::from(*start), usize::from(*length)));
            }
            Op::Remove(nth) => {
                let id = container
                    .attachments()
                    .nth(usize::from(*nth))
                    .map(Attachment::id);
                if let Some(id) = id {
                    assert!(container.remove(id).is_some());
                }
            }
            Op::Width(width) => {
                container.set_width(u32::from(*width));
                container.layout_if_needed();
            }
        }

        let buffer = container.buffer();
        let markers = buffer.attachment_markers(0..buffer.len()).count();
        assert_eq!(buffer.placeholder_count(), markers);
        assert_eq!(container.attachments().count(), markers);
        for (_, range) in buffer.attachment_markers(0..buffer.len()) {
            assert_eq!(buffer.char_at(range.start), Some(PLACEHOLDER));
        }
        assert!(container.selected_range().end() <= container.len());
    }
});
