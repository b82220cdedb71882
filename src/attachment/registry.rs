//! Ordered set of live attachments.

use super::{Attachment, AttachmentId};
use crate::widget::WidgetId;

/// The attachments currently inserted in a buffer, in insertion order.
///
/// Membership here is the source of truth for "this attachment is live".
/// The container keeps it in lockstep with the placeholder characters in the
/// buffer.
#[derive(Debug, Default)]
pub struct AttachmentRegistry {
    entries: Vec<Attachment>,
}

impl AttachmentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live attachments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register an attachment. Registering the same id twice is a no-op.
    pub fn insert(&mut self, attachment: Attachment) {
        if self.contains(attachment.id()) {
            return;
        }
        self.entries.push(attachment);
    }

    /// Unregister an attachment, handing ownership back.
    pub fn remove(&mut self, id: AttachmentId) -> Option<Attachment> {
        let idx = self.position(id)?;
        Some(self.entries.remove(idx))
    }

    #[must_use]
    pub fn contains(&self, id: AttachmentId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: AttachmentId) -> Option<&Attachment> {
        self.entries.iter().find(|a| a.id() == id)
    }

    pub fn get_mut(&mut self, id: AttachmentId) -> Option<&mut Attachment> {
        self.entries.iter_mut().find(|a| a.id() == id)
    }

    /// First attachment wrapping `widget`.
    #[must_use]
    pub fn find_by_widget(&self, widget: WidgetId) -> Option<AttachmentId> {
        self.entries
            .iter()
            .find(|a| a.widget_id() == widget)
            .map(Attachment::id)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Attachment> {
        self.entries.iter_mut()
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<AttachmentId> {
        self.entries.iter().map(Attachment::id).collect()
    }

    fn position(&self, id: AttachmentId) -> Option<usize> {
        self.entries.iter().position(|a| a.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{TagWidget, Widget};

    #[test]
    fn test_insert_preserves_order() {
        let mut registry = AttachmentRegistry::new();
        let a = Attachment::new(TagWidget::new("a"));
        let b = Attachment::new(TagWidget::new("b"));
        let (ida, idb) = (a.id(), b.id());
        registry.insert(b);
        registry.insert(a);
        assert_eq!(registry.ids(), vec![idb, ida]);
    }

    #[test]
    fn test_remove_returns_ownership() {
        let mut registry = AttachmentRegistry::new();
        let a = Attachment::new(TagWidget::new("a"));
        let id = a.id();
        registry.insert(a);
        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(registry.is_empty());
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn test_find_by_widget() {
        let mut registry = AttachmentRegistry::new();
        let widget = TagWidget::new("w");
        let widget_id = widget.id();
        let a = Attachment::new(widget);
        let id = a.id();
        registry.insert(a);
        registry.insert(Attachment::new(TagWidget::new("other")));

        assert_eq!(registry.find_by_widget(widget_id), Some(id));
        assert_eq!(registry.find_by_widget(WidgetId::next()), None);
    }
}
