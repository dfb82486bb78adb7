use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spaces per nesting level in the stored title prefix
pub const DEPTH_INDENT: &str = "  ";

/// A titled, ordered, flat checklist built from a markdown outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub id: String,
    pub title: String,
    pub items: Vec<OutlineItem>,
}

impl Outline {
    pub fn new(title: impl Into<String>, items: Vec<OutlineItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            items,
        }
    }

    pub fn item(&self, id: &str) -> Option<&OutlineItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// One checklist entry.
///
/// Hierarchy is carried by `depth` only; the serialized form bakes it into the
/// title as a `2 * depth` space prefix so stored data keeps its flat shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredOutlineItem", from = "StoredOutlineItem")]
pub struct OutlineItem {
    pub id: String,
    pub title: String,
    pub depth: usize,
    pub notes: Option<String>,
    pub covered_at: Option<i64>,
}

impl OutlineItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, depth: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            depth,
            notes: None,
            covered_at: None,
        }
    }

    /// Title with the nesting prefix, as stored and displayed.
    pub fn display_title(&self) -> String {
        format!("{}{}", DEPTH_INDENT.repeat(self.depth), self.title)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredOutlineItem {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    covered_at: Option<i64>,
}

impl From<OutlineItem> for StoredOutlineItem {
    fn from(item: OutlineItem) -> Self {
        Self {
            title: item.display_title(),
            id: item.id,
            notes: item.notes,
            covered_at: item.covered_at,
        }
    }
}

impl From<StoredOutlineItem> for OutlineItem {
    fn from(stored: StoredOutlineItem) -> Self {
        let mut depth = 0;
        let mut title = stored.title.as_str();
        while let Some(rest) = title.strip_prefix(DEPTH_INDENT) {
            depth += 1;
            title = rest;
        }

        Self {
            id: stored.id,
            title: title.to_string(),
            depth,
            notes: stored.notes,
            covered_at: stored.covered_at,
        }
    }
}
