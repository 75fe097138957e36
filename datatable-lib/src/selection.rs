//! Selection state for table rows.
//!
//! Selection is tracked by row key rather than position, so it survives
//! filtering, sorting and paging. Keys of rows that are no longer present
//! stay in the set and simply never match.

use std::collections::HashSet;

use crate::model::RowKey;

/// Visual state of a header "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// Every row on the page is selected.
    Checked,
    /// Some, but not all, rows on the page are selected.
    Indeterminate,
    /// No row on the page is selected (or the page is empty).
    Unchecked,
}

/// Key-based selection state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Currently selected keys
    selected: HashSet<RowKey>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected keys (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<RowKey> {
        let mut keys: Vec<_> = self.selected.iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<RowKey> {
        self.selected.drain().collect()
    }

    /// Toggle selection of a key.
    /// Returns (added, removed) keys.
    pub fn toggle(&mut self, key: &str) -> (Vec<RowKey>, Vec<RowKey>) {
        if self.selected.remove(key) {
            (vec![], vec![key.to_string()])
        } else {
            self.selected.insert(key.to_string());
            (vec![key.to_string()], vec![])
        }
    }

    /// Select every key in `keys`.
    /// Returns the keys that were newly selected.
    pub fn select_all(&mut self, keys: &[RowKey]) -> Vec<RowKey> {
        let mut added = Vec::new();
        for key in keys {
            if self.selected.insert(key.clone()) {
                added.push(key.clone());
            }
        }
        added
    }

    /// Deselect every key in `keys`, leaving other keys alone.
    /// Returns the keys that were removed.
    pub fn deselect_all(&mut self, keys: &[RowKey]) -> Vec<RowKey> {
        keys.iter()
            .filter(|key| self.selected.remove(key.as_str()))
            .cloned()
            .collect()
    }

    /// Flip a group of keys as a unit.
    ///
    /// If every key is already selected the whole group is deselected,
    /// otherwise the whole group is selected. An empty group is a no-op.
    /// Returns (added, removed) keys.
    pub fn toggle_group(&mut self, keys: &[RowKey]) -> (Vec<RowKey>, Vec<RowKey>) {
        if keys.is_empty() {
            return (vec![], vec![]);
        }
        if self.all_of(keys) {
            (vec![], self.deselect_all(keys))
        } else {
            (self.select_all(keys), vec![])
        }
    }

    /// True iff `keys` is non-empty and every key is selected.
    pub fn all_of(&self, keys: &[RowKey]) -> bool {
        !keys.is_empty() && keys.iter().all(|key| self.selected.contains(key))
    }

    /// True iff at least one of `keys` is selected.
    pub fn any_of(&self, keys: &[RowKey]) -> bool {
        keys.iter().any(|key| self.selected.contains(key))
    }

    /// Header checkbox state for a group of keys.
    pub fn check_state(&self, keys: &[RowKey]) -> CheckState {
        if self.all_of(keys) {
            CheckState::Checked
        } else if self.any_of(keys) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(items: &[&str]) -> Vec<RowKey> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_reports_changes() {
        let mut selection = Selection::new();
        assert_eq!(selection.toggle("a"), (keys(&["a"]), vec![]));
        assert!(selection.is_selected("a"));
        assert_eq!(selection.toggle("a"), (vec![], keys(&["a"])));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_group_leaves_outside_keys() {
        let mut selection = Selection::new();
        selection.toggle("outside");

        let page = keys(&["a", "b"]);
        let (added, removed) = selection.toggle_group(&page);
        assert_eq!(added.len(), 2);
        assert!(removed.is_empty());
        assert_eq!(selection.selected(), keys(&["a", "b", "outside"]));

        let (added, removed) = selection.toggle_group(&page);
        assert!(added.is_empty());
        assert_eq!(removed, page);
        assert_eq!(selection.selected(), keys(&["outside"]));
    }

    #[test]
    fn test_partial_group_selects_rest() {
        let mut selection = Selection::new();
        selection.toggle("a");
        let (added, _) = selection.toggle_group(&keys(&["a", "b", "c"]));
        assert_eq!(added, keys(&["b", "c"]));
    }

    #[test]
    fn test_check_state() {
        let mut selection = Selection::new();
        let page = keys(&["a", "b"]);
        assert_eq!(selection.check_state(&page), CheckState::Unchecked);
        selection.toggle("a");
        assert_eq!(selection.check_state(&page), CheckState::Indeterminate);
        selection.toggle("b");
        assert_eq!(selection.check_state(&page), CheckState::Checked);
        assert_eq!(selection.check_state(&[]), CheckState::Unchecked);
    }
}
