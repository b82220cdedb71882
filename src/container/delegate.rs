//! Host callbacks.
//!
//! All methods have defaults, so a host implements only what it cares about.
//! Callbacks run synchronously from inside container calls; work they cause
//! is queued, not run re-entrantly.

use super::Selection;
use crate::attachment::Attachment;
use crate::text::BufferChange;

/// Decides on and observes attachment deletion.
pub trait AttachmentDelegate {
    /// Asked once per edit that would delete `attachments`.
    ///
    /// Returning `false` aborts the whole edit without mutation.
    fn should_delete_attachments(&mut self, attachments: &[&Attachment]) -> bool {
        let _ = attachments;
        true
    }

    /// Called before the attachment's marker is stripped.
    fn will_delete_attachment(&mut self, attachment: &Attachment) {
        let _ = attachment;
    }

    /// Called after the attachment was detached and unregistered.
    fn did_delete_attachment(&mut self, attachment: &Attachment) {
        let _ = attachment;
    }
}

/// Observes editing on the text surface.
pub trait TextDelegate {
    fn should_begin_editing(&mut self) -> bool {
        true
    }

    fn should_end_editing(&mut self) -> bool {
        true
    }

    fn did_begin_editing(&mut self) {}

    fn did_end_editing(&mut self) {}

    /// Called for each change made through the user edit surface.
    fn text_did_change(&mut self, change: &BufferChange) {
        let _ = change;
    }

    fn selection_did_change(&mut self, selection: Selection) {
        let _ = selection;
    }
}
