/// Spaces that make up one indentation level
const SPACES_PER_LEVEL: usize = 2;

/// Leading whitespace of a line, tabs and spaces only.
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// Convert a raw line's leading whitespace to an indentation level.
///
/// A tab counts as two spaces; partial levels round down.
pub fn indentation_level(line: &str) -> usize {
    let width: usize = leading_whitespace(line)
        .chars()
        .map(|c| if c == '\t' { SPACES_PER_LEVEL } else { 1 })
        .sum();
    width / SPACES_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- item", 0)]
    #[case(" - item", 0)]
    #[case("  - item", 1)]
    #[case("   - item", 1)]
    #[case("    - item", 2)]
    #[case("\t- item", 1)]
    #[case("\t\t- item", 2)]
    #[case(" \t- item", 1)]
    #[case("", 0)]
    #[case("    ", 2)]
    fn test_indentation_level(#[case] line: &str, #[case] expected: usize) {
        assert_eq!(indentation_level(line), expected);
    }

    #[test]
    fn test_leading_whitespace_stops_at_content() {
        assert_eq!(leading_whitespace("  \tfoo  "), "  \t");
        assert_eq!(leading_whitespace("foo"), "");
    }
}
