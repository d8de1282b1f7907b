//! Per-run record of place identifiers that have already been admitted.

use std::collections::HashSet;

/// Grows monotonically for the lifetime of one run.
#[derive(Debug, Default)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and remembers `place_id` the first time it is seen,
    /// `false` on every later call with the same id.
    pub fn admit(&mut self, place_id: &str) -> bool {
        if self.ids.contains(place_id) {
            return false;
        }
        self.ids.insert(place_id.to_owned())
    }

    #[must_use]
    pub fn contains(&self, place_id: &str) -> bool {
        self.ids.contains(place_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admit_twice_returns_true_then_false() {
        let mut seen = SeenSet::new();
        assert!(seen.admit("ChIJ-a"));
        assert!(!seen.admit("ChIJ-a"));
        assert!(!seen.admit("ChIJ-a"));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn interleaved_ids_are_independent() {
        let mut seen = SeenSet::new();
        assert!(seen.admit("a"));
        assert!(seen.admit("b"));
        assert!(!seen.admit("a"));
        assert!(!seen.admit("b"));
        assert!(seen.contains("a") && seen.contains("b"));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn new_set_is_empty() {
        let seen = SeenSet::new();
        assert!(seen.is_empty());
        assert!(!seen.contains("a"));
    }
}
