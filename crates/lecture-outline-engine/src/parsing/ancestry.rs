//! Level-ordered ancestor stack shared by every place the parser reparents items.
//!
//! An entry is an ancestor of a line at `level` when its own level is strictly
//! smaller. Finding, popping and tree building all go through [`AncestorStack::parent_position`]
//! so they agree on that rule.

#[derive(Debug)]
pub struct AncestorStack<T> {
    entries: Vec<(usize, T)>,
}

impl<T> Default for AncestorStack<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> AncestorStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn parent_position(&self, level: usize) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|(entry_level, _)| *entry_level < level)
    }

    /// Nearest entry with a smaller level, leaving the stack untouched.
    pub fn nearest(&self, level: usize) -> Option<&T> {
        self.parent_position(level)
            .map(|position| &self.entries[position].1)
    }

    /// Pop every entry at `level` or deeper and return the new top.
    pub fn reparent(&mut self, level: usize) -> Option<&T> {
        let keep = self.parent_position(level).map_or(0, |p| p + 1);
        self.entries.truncate(keep);
        self.entries.last().map(|(_, value)| value)
    }

    pub fn push(&mut self, level: usize, value: T) {
        self.entries.push((level, value));
    }
}
