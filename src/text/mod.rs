//! Attributed text storage with bracketed edits.
//!
//! This module provides the rope-backed buffer that holds both plain
//! characters and attachment placeholders.
//!
//! Key types:
//!
//! - [`TextBuffer`]: characters plus attribute runs, mutated inside edit brackets
//! - [`BufferChange`]: the net effect of one bracket, queued for listeners
//! - [`AttachmentMarkers`]: lazy iterator over attachment markers in a range
//!
//! # Examples
//!
//! ```
//! use tagtext::{Attributes, TextBuffer};
//! use tagtext::attachment::PLACEHOLDER_STR;
//!
//! let mut buffer = TextBuffer::with_text("a b");
//! buffer.replace(2..2, PLACEHOLDER_STR).unwrap();
//! assert_eq!(buffer.len(), 4);
//! assert_eq!(buffer.placeholder_count(), 1);
//!
//! // Untagged placeholders are not markers.
//! assert_eq!(buffer.attachment_markers(0..4).count(), 0);
//! ```

mod buffer;
mod edit;
mod rope;
mod segment;

pub use buffer::TextBuffer;
pub use edit::{BufferChange, ChangeOrigin, EditActions};
pub use rope::RopeWrapper;
pub use segment::{AttachmentMarkers, AttributeRun, AttributeRuns};
