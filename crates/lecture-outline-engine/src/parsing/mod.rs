pub mod ancestry;
pub mod classify;
pub mod flatten;
pub mod indent;
pub mod notes;
pub mod validate;

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ItemKind, ParsedMarkdownItem};
use ancestry::AncestorStack;
use classify::{LineClass, classify_line, is_list_line, starts_with_marker};
use indent::indentation_level;
use notes::{body_spans, notes_block};

pub use flatten::{DEFAULT_OUTLINE_TITLE, convert_to_outline_format, flatten_items};
pub use validate::{ValidationResult, validate_markdown_items};

/// Result of parsing a markdown outline.
///
/// A non-empty `errors` list means `items` should not be used to create an outline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownParseResult {
    /// Top-level items; nested items live in `children`
    pub items: Vec<ParsedMarkdownItem>,
    pub title: Option<String>,
    pub errors: Vec<String>,
}

impl MarkdownParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

fn heading_regex() -> &'static Regex {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADING_REGEX.get_or_init(|| Regex::new(r"^#+\s+(.+)$").expect("Invalid heading regex"))
}

/// Document title from the first non-blank line.
///
/// A heading gives its text, a list line means there is no title, and any
/// other text is used whole.
pub fn extract_title(lines: &[&str]) -> Option<String> {
    let first = lines.iter().map(|line| line.trim()).find(|line| !line.is_empty())?;

    if let Some(caps) = heading_regex().captures(first) {
        return Some(caps[1].trim().to_string());
    }
    if is_list_line(first) || starts_with_marker(first) {
        return None;
    }
    Some(first.to_string())
}

/// Parse a markdown list into a tree of items, a title and line errors.
///
/// Plain bullets nested under a checklist item are not items of their own:
/// they stay in the text that becomes the checklist item's notes, and
/// malformed list lines in that position are not reported.
pub fn parse_markdown_list(text: &str) -> MarkdownParseResult {
    let lines: Vec<&str> = text.lines().collect();
    let title = extract_title(&lines);

    let mut errors = Vec::new();
    let mut flat: Vec<ParsedMarkdownItem> = Vec::new();
    let mut item_lines: Vec<usize> = Vec::new();
    let mut ancestors: AncestorStack<ItemKind> = AncestorStack::new();

    for (index, line) in lines.iter().enumerate() {
        let level = indentation_level(line);
        let under_checklist = ancestors
            .nearest(level)
            .is_some_and(|kind| kind.is_checklist());

        match classify_line(line, index) {
            LineClass::Invalid(error) => {
                if level > 0 && under_checklist && starts_with_marker(line.trim_start()) {
                    log::debug!("Keeping line {} as checklist notes", index + 1);
                } else {
                    errors.push(error);
                }
            }
            LineClass::Item(item) => {
                let parent_is_checklist = ancestors
                    .reparent(item.level)
                    .is_some_and(|kind| kind.is_checklist());
                if item.kind == ItemKind::Bullet && item.level > 0 && parent_is_checklist {
                    continue;
                }
                ancestors.push(item.level, item.kind);
                flat.push(item);
                item_lines.push(index);
            }
            LineClass::Blank | LineClass::Text => {}
        }
    }

    for (item, body) in flat.iter_mut().zip(body_spans(&lines, &item_lines)) {
        item.notes = notes_block(body);
    }

    MarkdownParseResult {
        items: build_tree(flat),
        title,
        errors,
    }
}

/// Nest a document-ordered flat list by level.
fn build_tree(flat: Vec<ParsedMarkdownItem>) -> Vec<ParsedMarkdownItem> {
    let mut stack = AncestorStack::new();
    let parents: Vec<Option<usize>> = flat
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let parent = stack.reparent(item.level).copied();
            stack.push(item.level, index);
            parent
        })
        .collect();

    // Children always follow their parent, so walking backwards finishes each
    // subtree before it is moved under its parent.
    let mut slots: Vec<Option<ParsedMarkdownItem>> = flat.into_iter().map(Some).collect();
    let mut roots = Vec::new();
    for index in (0..slots.len()).rev() {
        let Some(item) = slots[index].take() else {
            continue;
        };
        match parents[index].and_then(|parent| slots[parent].as_mut()) {
            Some(parent) => parent.children.insert(0, item),
            None => roots.insert(0, item),
        }
    }
    roots
}
