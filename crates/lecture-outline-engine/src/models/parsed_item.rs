use uuid::Uuid;

/// What kind of list line an item was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// `- text` or `* text`
    Bullet,
    /// `- [ ] text` / `- [x] text`
    Todo { completed: bool },
}

impl ItemKind {
    pub fn is_checklist(&self) -> bool {
        matches!(self, ItemKind::Todo { .. })
    }
}

/// A list item produced by the markdown parser, before flattening into an outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMarkdownItem {
    pub id: String,
    pub title: String,
    pub notes: Option<String>,
    pub kind: ItemKind,
    /// Indentation level relative to the document (2 spaces or 1 tab per level)
    pub level: usize,
    pub children: Vec<ParsedMarkdownItem>,
}

impl ParsedMarkdownItem {
    pub fn new(title: impl Into<String>, kind: ItemKind, level: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            notes: None,
            kind,
            level,
            children: Vec::new(),
        }
    }

    /// Completion flag, only present for checklist items.
    pub fn completed(&self) -> Option<bool> {
        match self.kind {
            ItemKind::Todo { completed } => Some(completed),
            ItemKind::Bullet => None,
        }
    }

    pub fn is_checklist(&self) -> bool {
        self.kind.is_checklist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_items_get_unique_ids() {
        let a = ParsedMarkdownItem::new("A", ItemKind::Bullet, 0);
        let b = ParsedMarkdownItem::new("A", ItemKind::Bullet, 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_completed_only_for_todos() {
        let bullet = ParsedMarkdownItem::new("A", ItemKind::Bullet, 0);
        let done = ParsedMarkdownItem::new("B", ItemKind::Todo { completed: true }, 0);

        assert_eq!(bullet.completed(), None);
        assert!(!bullet.is_checklist());
        assert_eq!(done.completed(), Some(true));
        assert!(done.is_checklist());
    }
}
