//! Pagination window.

use serde::{Deserialize, Serialize};

/// Pagination window: skip `offset` records, then keep at most `count`.
///
/// A rule with both values at zero is *undefined* and leaves a collection
/// untouched. A zero `count` with a non-zero `offset` keeps everything from
/// the offset to the end.
///
/// ```
/// use sieve_query::LimitRule;
///
/// let rule = LimitRule::new(2, 1);
/// assert_eq!(rule.apply(vec!['a', 'b', 'c', 'd', 'e']), vec!['b', 'c']);
///
/// assert!(!LimitRule::default().is_defined());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LimitRule {
    /// Maximum number of records to keep; zero means no maximum.
    pub count: usize,
    /// Number of records to skip.
    pub offset: usize,
}

impl LimitRule {
    /// Creates a new limit rule.
    pub fn new(count: usize, offset: usize) -> Self {
        LimitRule { count, offset }
    }

    /// Returns `true` if this rule limits anything.
    pub fn is_defined(&self) -> bool {
        self.count != 0 || self.offset != 0
    }

    /// Applies the window to `items`.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        if !self.is_defined() {
            return items;
        }
        let take = if self.count == 0 { usize::MAX } else { self.count };
        items.into_iter().skip(self.offset).take(take).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_when_either_value_is_set() {
        assert!(!LimitRule::new(0, 0).is_defined());
        assert!(LimitRule::new(1, 0).is_defined());
        assert!(LimitRule::new(0, 1).is_defined());
    }

    #[test]
    fn count_and_offset() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(LimitRule::new(2, 1).apply(items), vec![1, 2]);
    }

    #[test]
    fn count_only() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(LimitRule::new(3, 0).apply(items), vec![0, 1, 2]);
    }

    #[test]
    fn zero_count_runs_to_end() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(LimitRule::new(0, 3).apply(items), vec![3, 4]);
    }

    #[test]
    fn undefined_keeps_everything() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(LimitRule::default().apply(items.clone()), items);
    }

    #[test]
    fn offset_past_end_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        assert!(LimitRule::new(2, 10).apply(items).is_empty());
    }

    #[test]
    fn count_larger_than_collection() {
        let items: Vec<u32> = (0..3).collect();
        assert_eq!(LimitRule::new(10, 1).apply(items), vec![1, 2]);
    }
}
