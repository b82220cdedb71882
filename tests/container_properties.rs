//! Integration tests for the container's observable guarantees.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Once;

use tagtext::attachment::PLACEHOLDER;
use tagtext::{
    Attachment, AttachmentDelegate, BufferChange, ChangeOrigin, Container, ContainerOptions,
    EdgeInsets, Error, Selection, TagWidget, TextDelegate, Widget,
};
use tracing::{debug, info};

fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

fn manual() -> Container {
    Container::new(ContainerOptions::default().with_auto_tokenize(false))
}

fn type_chars(container: &mut Container, text: &str) {
    for ch in text.chars() {
        container.insert_text(ch.encode_utf8(&mut [0; 4])).unwrap();
    }
}

/// Placeholders and registered attachments match one to one.
fn assert_bijection(container: &Container) {
    let buffer = container.buffer();
    let markers: Vec<_> = buffer.attachment_markers(0..buffer.len()).collect();
    assert_eq!(buffer.placeholder_count(), markers.len(), "stray placeholder");
    assert_eq!(container.attachments().count(), markers.len(), "stray attachment");

    let mut seen = HashSet::new();
    for (id, range) in markers {
        assert_eq!(range.len(), 1, "marker spans more than one char");
        assert_eq!(buffer.char_at(range.start), Some(PLACEHOLDER));
        assert!(container.attachment(id).is_some(), "marker without attachment");
        assert!(seen.insert(id), "attachment marked twice");
    }
}

#[derive(Default)]
struct Veto(Rc<RefCell<bool>>);

impl AttachmentDelegate for Veto {
    fn should_delete_attachments(&mut self, _attachments: &[&Attachment]) -> bool {
        !*self.0.borrow()
    }
}

#[derive(Default)]
struct Changes {
    text: Vec<BufferChange>,
    selections: Vec<Selection>,
}

struct ChangeLog(Rc<RefCell<Changes>>);

impl TextDelegate for ChangeLog {
    fn text_did_change(&mut self, change: &BufferChange) {
        self.0.borrow_mut().text.push(change.clone());
    }

    fn selection_did_change(&mut self, selection: Selection) {
        self.0.borrow_mut().selections.push(selection);
    }
}

#[test]
fn insertion_collapses_selection_after_placeholder() {
    setup_test_logging();
    let mut container = manual();
    container.set_text("abcdef").unwrap();
    container.set_selected_range(Selection::new(2, 3)).unwrap();

    let outcome = container.insert(Attachment::new(TagWidget::new("tag"))).unwrap();
    assert!(outcome.is_inserted());
    assert_eq!(container.len(), 6 + 1 - 3);
    assert_eq!(container.selected_range(), Selection::caret(3));
    assert_bijection(&container);
}

#[test]
fn veto_leaves_everything_untouched() {
    setup_test_logging();
    let vetoing = Rc::new(RefCell::new(true));
    let mut container = manual();
    container.set_text("ab").unwrap();
    container.set_selected_range(Selection::caret(1)).unwrap();
    let id = container
        .insert(Attachment::new(TagWidget::new("keep")))
        .unwrap()
        .id()
        .unwrap();
    container.set_attachment_delegate(Veto(Rc::clone(&vetoing)));

    let text = container.text();
    let revision = container.buffer().revision();
    let selection = container.selected_range();

    assert!(!container.replace_characters(0..3, "zz").unwrap());
    assert!(!container.set_text("fresh").unwrap());
    let refused = container
        .replace(Attachment::new(TagWidget::new("other")), 1..2)
        .unwrap()
        .into_vetoed()
        .unwrap();
    assert!(!refused.is_mounted());

    assert_eq!(container.text(), text);
    assert_eq!(container.buffer().revision(), revision);
    assert_eq!(container.selected_range(), selection);
    assert!(container.attachment(id).unwrap().is_mounted());
    assert_bijection(&container);

    *vetoing.borrow_mut() = false;
    assert!(container.replace_characters(0..3, "zz").unwrap());
    assert_eq!(container.text(), "zz");
    assert!(container.attachment(id).is_none());
    assert_bijection(&container);
}

#[test]
fn tokenizer_waits_for_separator() {
    setup_test_logging();
    let mut container = Container::default();

    type_chars(&mut container, "hello");
    assert_eq!(container.attachments().count(), 0);

    type_chars(&mut container, " ");
    assert_eq!(container.attachments().count(), 1);

    type_chars(&mut container, "world");
    info!(text = %container.text(), "typed second word");
    assert_eq!(container.attachments().count(), 1);
    assert_eq!(container.text(), format!("{PLACEHOLDER} world"));

    type_chars(&mut container, " ");
    assert_eq!(container.attachments().count(), 2);
    assert_eq!(container.text(), format!("{PLACEHOLDER} {PLACEHOLDER} "));
    assert_eq!(container.selected_range(), Selection::caret(4));
    assert_eq!(container.export_text(0..4).unwrap(), "hello world ");
    assert_bijection(&container);
}

#[test]
fn pasted_text_promotes_every_terminated_word() {
    setup_test_logging();
    let mut container = Container::default();
    container.insert_text("one two\nthree four").unwrap();

    let labels: Vec<_> = container
        .attachments()
        .filter_map(|a| a.widget().label().map(str::to_string))
        .collect();
    debug!(?labels, "promoted");
    assert_eq!(labels.len(), 3);
    assert!(labels.contains(&"one".to_string()));
    assert!(labels.contains(&"three".to_string()));
    assert_eq!(container.export_text(0..container.len()).unwrap(), "one two\nthree four");
    assert_bijection(&container);
}

#[test]
fn word_before_tag_promotes_once_text_follows() {
    setup_test_logging();
    let mut container = Container::default();
    container.insert_text("foo").unwrap();
    container.insert(Attachment::new(TagWidget::new("x"))).unwrap();
    assert_eq!(container.text(), format!("foo{PLACEHOLDER}"));
    assert_eq!(container.attachments().count(), 1);

    container.insert_text(" ").unwrap();
    let labels: Vec<_> = container
        .attachments()
        .filter_map(|a| a.widget().label().map(str::to_string))
        .collect();
    assert_eq!(labels, vec!["x".to_string(), "foo".to_string()]);
    assert_eq!(container.text(), format!("{PLACEHOLDER}{PLACEHOLDER} "));
    assert_eq!(container.selected_range(), Selection::caret(3));
    assert_eq!(container.export_text(0..3).unwrap(), "foox ");
    assert_bijection(&container);
}

#[test]
fn promotion_round_trip() {
    setup_test_logging();
    let mut container = manual();
    container.set_text("see foo bar").unwrap();
    let id = container
        .replace(Attachment::new(TagWidget::new("foo")), 4..7)
        .unwrap()
        .id()
        .unwrap();

    assert_eq!(container.len(), 9);
    let markers: Vec<_> = container.buffer().attachment_markers(0..9).collect();
    assert_eq!(markers, vec![(id, 4..5)]);
    assert_eq!(container.export_text(0..9).unwrap(), "see foo bar");
    assert_eq!(container.export_text(4..5).unwrap(), "foo");
}

#[test]
fn removal_is_symmetric_with_insertion() {
    setup_test_logging();
    let mut container = manual();
    container.set_text("ab").unwrap();
    container.set_selected_range(Selection::caret(1)).unwrap();
    let before = container.text();

    let attachment = Attachment::new(TagWidget::new("x"));
    let widget = attachment.widget_id();
    let id = container.insert(attachment).unwrap().id().unwrap();

    let removed = container.remove(id).unwrap();
    assert_eq!(removed.widget_id(), widget);
    assert!(!removed.is_mounted());
    assert_eq!(container.text(), before);
    assert_eq!(container.attachments().count(), 0);
    assert_bijection(&container);

    assert!(container.remove(id).is_none());
}

#[test]
fn out_of_range_requests_are_rejected() {
    setup_test_logging();
    let mut container = manual();
    container.set_text("abc").unwrap();

    let err = container.replace_characters(2..9, "x").unwrap_err();
    assert_eq!(err, Error::Range { start: 2, end: 9, len: 3 });
    assert!(container.draw_glyphs(0..4).is_err());
    assert!(container.export_text(1..5).is_err());
    assert!(container.set_selected_range(Selection::new(4, 0)).is_err());
    assert_eq!(container.text(), "abc");
}

#[test]
fn only_user_edits_reach_text_delegate() {
    setup_test_logging();
    let changes = Rc::new(RefCell::new(Changes::default()));
    let mut container = Container::default();
    container.set_text_delegate(ChangeLog(Rc::clone(&changes)));

    container.set_text("programmatic words ").unwrap();
    container.insert(Attachment::new(TagWidget::new("x"))).unwrap();
    assert!(changes.borrow().text.is_empty());

    container.set_text("").unwrap();
    container.insert_text("hi ").unwrap();
    let log = changes.borrow();
    assert_eq!(log.text.len(), 1);
    assert_eq!(log.text[0].origin, ChangeOrigin::User);
    assert_eq!(log.text[0].range, 0..3);
    assert_eq!(log.selections.last(), Some(&Selection::caret(2)));
}

#[test]
fn deleting_tag_through_its_affordance() {
    setup_test_logging();
    let mut container = Container::default();
    container.insert_text("alpha beta ").unwrap();
    let widget = container
        .attachments()
        .find(|a| a.widget().label() == Some("alpha"))
        .unwrap()
        .widget_id();

    container.update_widget(widget, |w| w.request_delete());
    assert_eq!(container.flush_delete_requests(), 1);
    assert_eq!(container.export_text(0..container.len()).unwrap(), " beta ");
    assert_bijection(&container);
}

#[test]
fn layout_pins_widgets_to_placeholders() {
    setup_test_logging();
    let mut container = Container::new(ContainerOptions::default().with_width(20));
    type_chars(&mut container, "alpha beta gamma ");
    container.layout_if_needed();

    let dump = container
        .attachments()
        .map(|a| {
            let frame = a.frame().unwrap();
            format!(
                "{} {},{} {}x{}",
                a.widget().label().unwrap_or_default(),
                frame.x,
                frame.y,
                frame.width,
                frame.height
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(dump, @r"
    alpha 0,0 10x1
    beta 11,0 9x1
    gamma 0,1 10x1
    ");
}

#[test]
fn inset_moves_widget_frames() {
    setup_test_logging();
    let mut container = Container::new(
        ContainerOptions::default()
            .with_auto_tokenize(false)
            .with_inset(EdgeInsets::uniform(2)),
    );
    let id = container
        .insert(Attachment::new(TagWidget::new("x")))
        .unwrap()
        .id()
        .unwrap();
    container.layout_if_needed();
    let frame = container.attachment(id).unwrap().frame().unwrap();
    assert_eq!((frame.x, frame.y), (2, 2));

    container.set_text_container_inset(EdgeInsets::uniform(3));
    assert_eq!(container.text_container_inset(), EdgeInsets::uniform(3));
    container.layout_if_needed();
    let frame = container.attachment(id).unwrap().frame().unwrap();
    assert_eq!((frame.x, frame.y), (3, 3));
}

#[derive(Debug)]
struct Spacer(tagtext::WidgetId);

impl Widget for Spacer {
    fn id(&self) -> tagtext::WidgetId {
        self.0
    }

    fn size(&self) -> tagtext::Size {
        tagtext::Size::ZERO
    }
}

#[test]
fn zero_size_widget_stays_hidden() {
    setup_test_logging();
    let mut container = manual();
    let id = container
        .insert(Attachment::new(Spacer(tagtext::WidgetId::next())))
        .unwrap()
        .id()
        .unwrap();
    assert_eq!(container.draw_glyphs(0..1).unwrap(), 0);
    let attachment = container.attachment(id).unwrap();
    assert!(attachment.is_mounted());
    assert!(!attachment.is_visible());
    assert_bijection(&container);
}
