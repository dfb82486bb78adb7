use crate::models::ParsedMarkdownItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Check that there is at least one item and that no item, at any depth, has a blank title.
pub fn validate_markdown_items(items: &[ParsedMarkdownItem]) -> ValidationResult {
    let mut errors = Vec::new();

    if items.is_empty() {
        errors.push("No valid list items found".to_string());
    }
    collect_title_errors(items, &mut errors);

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn collect_title_errors(items: &[ParsedMarkdownItem], errors: &mut Vec<String>) {
    for item in items {
        if item.title.trim().is_empty() {
            errors.push(format!("Item with ID {} has empty title", item.id));
        }
        collect_title_errors(&item.children, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_item_list_is_invalid() {
        let result = validate_markdown_items(&[]);

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["No valid list items found".to_string()]);
    }

    #[test]
    fn test_valid_items() {
        let items = vec![ParsedMarkdownItem::new("Intro", ItemKind::Bullet, 0)];
        let result = validate_markdown_items(&items);

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_blank_title_found_at_any_depth() {
        // Given a valid root with a whitespace-only grandchild
        let mut grandchild = ParsedMarkdownItem::new("   ", ItemKind::Todo { completed: false }, 2);
        grandchild.id = "deep-id".to_string();
        let mut child = ParsedMarkdownItem::new("Child", ItemKind::Bullet, 1);
        child.children.push(grandchild);
        let mut root = ParsedMarkdownItem::new("Root", ItemKind::Bullet, 0);
        root.children.push(child);

        // When validated
        let result = validate_markdown_items(&[root]);

        // Then the grandchild is named
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Item with ID deep-id has empty title".to_string()]
        );
    }
}
