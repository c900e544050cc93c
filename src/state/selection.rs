//! Bounded, insertion-ordered selection of state names.

use std::collections::VecDeque;

/// Maximum number of states that can be selected at once.
pub const SELECTION_CAPACITY: usize = 5;

/// Ordered set of selected state names.
///
/// Names are unique and kept in insertion order. Toggling a present name
/// removes it; toggling a new name when full evicts the oldest entry first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    names: VecDeque<String>,
    capacity: usize,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of [`SelectionSet::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The name was present and has been removed.
    Removed,
    /// The name was added without eviction.
    Added,
    /// The name was added and the oldest entry was evicted.
    AddedEvicting(String),
}

impl SelectionSet {
    /// Creates an empty selection with the default capacity (5).
    pub fn new() -> Self {
        Self::with_capacity(SELECTION_CAPACITY)
    }

    /// Creates an empty selection with the given capacity (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            names: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds the name if absent, removes it if present.
    pub fn toggle(&mut self, name: &str) -> ToggleOutcome {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
            return ToggleOutcome::Removed;
        }

        let evicted = if self.names.len() >= self.capacity {
            self.names.pop_front()
        } else {
            None
        };
        self.names.push_back(name.to_string());

        match evicted {
            Some(old) => ToggleOutcome::AddedEvicting(old),
            None => ToggleOutcome::Added,
        }
    }

    /// Removes every name.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Owned copy of the names, oldest first.
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &SelectionSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut set = SelectionSet::new();
        assert_eq!(set.toggle("Ohio"), ToggleOutcome::Added);
        assert!(set.contains("Ohio"));
        assert_eq!(set.toggle("Ohio"), ToggleOutcome::Removed);
        assert!(set.is_empty());
    }

    #[test]
    fn test_sixth_selection_evicts_oldest() {
        let mut set = SelectionSet::new();
        for name in ["California", "Texas", "Vermont", "Ohio", "Iowa"] {
            set.toggle(name);
        }
        assert_eq!(set.len(), 5);

        let outcome = set.toggle("Maine");
        assert_eq!(outcome, ToggleOutcome::AddedEvicting("California".to_string()));
        assert_eq!(names(&set), ["Texas", "Vermont", "Ohio", "Iowa", "Maine"]);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut set = SelectionSet::new();
        for name in ["A", "B", "C", "D"] {
            set.toggle(name);
        }
        set.toggle("B");
        assert_eq!(names(&set), ["A", "C", "D"]);
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut set = SelectionSet::new();
        for i in 0..50 {
            set.toggle(&format!("state-{}", i % 13));
            assert!(set.len() <= SELECTION_CAPACITY);
        }
    }

    #[test]
    fn test_reselecting_evicted_name_is_new_entry() {
        let mut set = SelectionSet::with_capacity(2);
        set.toggle("A");
        set.toggle("B");
        set.toggle("C");
        assert_eq!(names(&set), ["B", "C"]);
        set.toggle("A");
        assert_eq!(names(&set), ["C", "A"]);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut set = SelectionSet::with_capacity(0);
        set.toggle("A");
        set.toggle("B");
        assert_eq!(names(&set), ["B"]);
    }
}
