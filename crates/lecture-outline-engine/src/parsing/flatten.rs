use super::MarkdownParseResult;
use crate::models::{Outline, OutlineItem, ParsedMarkdownItem};

/// Title used when neither the caller nor the document provides one
pub const DEFAULT_OUTLINE_TITLE: &str = "Imported Outline";

/// Flatten an item tree in pre-order, recording each item's depth in the walk.
pub fn flatten_items(items: &[ParsedMarkdownItem]) -> Vec<OutlineItem> {
    let mut flat = Vec::new();
    flatten_into(items, 0, &mut flat);
    flat
}

fn flatten_into(items: &[ParsedMarkdownItem], depth: usize, out: &mut Vec<OutlineItem>) {
    for item in items {
        out.push(OutlineItem {
            id: item.id.clone(),
            title: item.title.clone(),
            depth,
            notes: item.notes.clone(),
            covered_at: None,
        });
        flatten_into(&item.children, depth + 1, out);
    }
}

/// Wrap parsed items into an outline.
///
/// Title precedence: `custom_title`, then the parsed title, then [`DEFAULT_OUTLINE_TITLE`].
pub fn convert_to_outline_format(
    result: &MarkdownParseResult,
    custom_title: Option<&str>,
) -> Outline {
    let title = custom_title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .or(result.title.as_deref())
        .unwrap_or(DEFAULT_OUTLINE_TITLE);

    Outline::new(title, flatten_items(&result.items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_markdown_list;
    use pretty_assertions::assert_eq;

    fn display_titles(outline: &Outline) -> Vec<String> {
        outline.items.iter().map(|i| i.display_title()).collect()
    }

    #[test]
    fn test_flatten_prefixes_by_depth() {
        let result = parse_markdown_list(
            "# My Outline\n- Item 1\n- Item 2\n  - Subitem 2.1\n- [ ] Todo Item",
        );

        let outline = convert_to_outline_format(&result, None);

        assert_eq!(outline.title, "My Outline");
        assert_eq!(
            display_titles(&outline),
            vec!["Item 1", "Item 2", "  Subitem 2.1", "Todo Item"]
        );
    }

    #[test]
    fn test_depth_follows_walk_not_source_indent() {
        // Given a child indented by two levels in the source
        let result = parse_markdown_list("- root\n    - skipped a level\n      - deeper");

        let items = flatten_items(&result.items);

        // Then prefixes follow tree depth
        let depths: Vec<usize> = items.iter().map(|i| i.depth).collect();
        assert_eq!(depths, vec![0, 1, 2]);
        assert_eq!(items[1].display_title(), "  skipped a level");
    }

    #[test]
    fn test_ids_and_notes_carried_over() {
        let result = parse_markdown_list("- Topic\n  some notes");

        let items = flatten_items(&result.items);

        assert_eq!(items[0].id, result.items[0].id);
        assert_eq!(items[0].notes.as_deref(), Some("some notes"));
        assert_eq!(items[0].covered_at, None);
    }

    #[test]
    fn test_title_precedence() {
        let titled = parse_markdown_list("# Parsed\n- a");
        let untitled = parse_markdown_list("- a");

        assert_eq!(convert_to_outline_format(&titled, Some("Custom")).title, "Custom");
        assert_eq!(convert_to_outline_format(&titled, Some("  ")).title, "Parsed");
        assert_eq!(convert_to_outline_format(&titled, None).title, "Parsed");
        assert_eq!(
            convert_to_outline_format(&untitled, None).title,
            DEFAULT_OUTLINE_TITLE
        );
    }
}
