use std::sync::OnceLock;

use regex::Regex;

use super::indent::indentation_level;
use crate::models::{ItemKind, ParsedMarkdownItem};

/// Classification of a single source line, made without looking at its neighbours.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// Whitespace only
    Blank,
    /// Not a list line; a title candidate at the top or note text when indented
    Text,
    /// A `- text` bullet or `- [ ] text` todo
    Item(ParsedMarkdownItem),
    /// Starts with a list marker but is not a well-formed list line
    Invalid(String),
}

fn todo_regex() -> &'static Regex {
    static TODO_REGEX: OnceLock<Regex> = OnceLock::new();
    TODO_REGEX
        .get_or_init(|| Regex::new(r"^-?\s*\[([ xX])\]\s+(.+)$").expect("Invalid todo regex"))
}

fn bullet_regex() -> &'static Regex {
    static BULLET_REGEX: OnceLock<Regex> = OnceLock::new();
    BULLET_REGEX.get_or_init(|| Regex::new(r"^[-*]\s+(.+)$").expect("Invalid bullet regex"))
}

/// Whether trimmed text begins with a list marker (`-` or `*`).
pub fn starts_with_marker(trimmed: &str) -> bool {
    trimmed.starts_with('-') || trimmed.starts_with('*')
}

/// Whether trimmed text is a well-formed bullet or todo line.
pub fn is_list_line(trimmed: &str) -> bool {
    todo_regex().is_match(trimmed) || bullet_regex().is_match(trimmed)
}

/// Classify one line. `line_number` is 0-based and only used in error messages.
pub fn classify_line(line: &str, line_number: usize) -> LineClass {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineClass::Blank;
    }

    let level = indentation_level(line);

    if let Some(caps) = todo_regex().captures(trimmed) {
        let completed = caps[1].eq_ignore_ascii_case("x");
        let title = caps[2].trim();
        return LineClass::Item(ParsedMarkdownItem::new(
            title,
            ItemKind::Todo { completed },
            level,
        ));
    }

    if let Some(caps) = bullet_regex().captures(trimmed) {
        let title = caps[1].trim();
        return LineClass::Item(ParsedMarkdownItem::new(title, ItemKind::Bullet, level));
    }

    if !starts_with_marker(trimmed) {
        return LineClass::Text;
    }

    LineClass::Invalid(format!(
        "Line {}: Invalid list format: \"{}\"",
        line_number + 1,
        trimmed
    ))
}
