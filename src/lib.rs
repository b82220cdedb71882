//! `tagtext` - Attachment-aware text container with inline tag widgets
//!
//! A headless text surface where plain characters and self-sized widgets
//! share one character sequence. Each widget occupies a single U+FFFC
//! placeholder that carries an attachment marker; layout pins the widget to
//! its placeholder glyph, and an optional tokenizer turns typed words into
//! tag widgets as soon as a separator follows them.
//!
//! # Quick Start
//!
//! ```
//! use tagtext::{Attachment, Container, ContainerOptions, TagWidget};
//!
//! let mut container = Container::new(ContainerOptions::default().with_auto_tokenize(false));
//! container.set_text("see foo bar").unwrap();
//!
//! let outcome = container
//!     .replace(Attachment::new(TagWidget::new("foo")), 4..7)
//!     .unwrap();
//! assert!(outcome.is_inserted());
//! assert_eq!(container.len(), 9);
//! assert_eq!(container.export_text(0..9).unwrap(), "see foo bar");
//! ```

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow AttachmentRegistry etc
#![allow(clippy::missing_errors_doc)] // Range errors are documented once on Error
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::cast_possible_wrap)] // Length deltas fit in isize
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod attachment;
pub mod container;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod style;
pub mod text;
pub mod tokenizer;
pub mod unicode;
pub mod widget;

// Re-export core types at crate root
pub use attachment::{Attachment, AttachmentId, AttachmentRegistry, Mount, PLACEHOLDER};
pub use error::{Error, Result};
pub use geometry::{EdgeInsets, Point, Rect, Size};
pub use style::{Attributes, Font, ParagraphStyle, WrapMode};
pub use widget::{TagWidget, Widget, WidgetId};

// Re-export commonly used types
pub use container::{
    AttachmentDelegate, Container, ContainerOptions, InsertOutcome, MAX_WORK_ITEMS, Selection,
    TextDelegate,
};
pub use layout::{LayoutConfig, LayoutPass, LineFragment, TextLayout};
pub use text::{BufferChange, ChangeOrigin, EditActions, TextBuffer};
pub use tokenizer::{Token, Tokenizer};
pub use unicode::WidthMethod;
