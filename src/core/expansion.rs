//! The expand/collapse state of the browse tree.

use std::collections::HashSet;

/// The set of folder keys currently shown open.
///
/// Both hierarchy levels share this one set: `course/branch` keys and
/// `course/branch/semester` keys differ only by their string shape. A key
/// stays in the set while its parent is collapsed, so re-opening the parent
/// restores the children as they were.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `key` and returns whether it is now expanded.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}
