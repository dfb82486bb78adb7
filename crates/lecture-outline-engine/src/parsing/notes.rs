use super::indent::leading_whitespace;

/// Build a notes block from the raw lines found under an item.
///
/// Lines are dedented by their common leading whitespace, blank lines become
/// empty, and blank lines at either end are dropped.
pub fn notes_block(body: &[&str]) -> Option<String> {
    let common = body
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace(line).len())
        .min()?;

    let dedented: Vec<&str> = body
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[common..]
            }
        })
        .collect();

    let first = dedented.iter().position(|line| !line.is_empty())?;
    let last = dedented.iter().rposition(|line| !line.is_empty())?;

    let notes = dedented[first..=last].join("\n").trim_end().to_string();
    (!notes.is_empty()).then_some(notes)
}

/// Lines strictly between each item's source line and the next one's.
///
/// `item_lines` must be ascending; the last item's span runs to the end of `lines`.
pub fn body_spans<'a>(lines: &'a [&'a str], item_lines: &[usize]) -> Vec<&'a [&'a str]> {
    item_lines
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = item_lines.get(i + 1).copied().unwrap_or(lines.len());
            &lines[start + 1..end]
        })
        .collect()
}
