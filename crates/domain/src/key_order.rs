//! Caller-supplied key ordering for emitted mappings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Preferred order of mapping keys when a record is written out.
///
/// Two keys that are both listed compare by list position. In every other
/// case the two key names compare lexicographically, even when one of them
/// is listed, so a listed key may sort after an unlisted one.
///
/// # Example
///
/// ```
/// use folio_domain::SortedKeys;
///
/// let order = SortedKeys::new(["title", "date", "body"]);
/// let mut keys = vec!["body", "title", "date"];
/// order.sort_by_name(&mut keys, |k| *k);
/// assert_eq!(keys, ["title", "date", "body"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortedKeys(Vec<String>);

impl SortedKeys {
    /// Creates an ordering from key names.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Returns the listed keys.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.0
    }

    /// Returns true if no keys are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the position of `key` in the list.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|k| k == key)
    }

    /// Compares two key names.
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(idx_a), Some(idx_b)) => idx_a.cmp(&idx_b),
            _ => a.cmp(b),
        }
    }

    /// Sorts `items` by the key name `name` extracts.
    ///
    /// Stable binary insertion sort: equal keys keep their relative order,
    /// and the result is deterministic even when the comparator is not a
    /// total order.
    pub fn sort_by_name<T, F>(&self, items: &mut [T], name: F)
    where
        F: Fn(&T) -> &str,
    {
        for i in 1..items.len() {
            let mut left = 0;
            let mut right = i;
            while left < right {
                let mid = left + (right - left) / 2;
                if self.compare(name(&items[i]), name(&items[mid])) == Ordering::Less {
                    right = mid;
                } else {
                    left = mid + 1;
                }
            }
            items[left..=i].rotate_right(1);
        }
    }
}

impl From<Vec<String>> for SortedKeys {
    fn from(keys: Vec<String>) -> Self {
        Self(keys)
    }
}

impl<S: Into<String>> FromIterator<S> for SortedKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted<'a>(order: &SortedKeys, keys: &[&'a str]) -> Vec<&'a str> {
        let mut keys = keys.to_vec();
        order.sort_by_name(&mut keys, |k| *k);
        keys
    }

    #[test]
    fn test_empty_order_is_lexicographic() {
        assert_eq!(sorted(&SortedKeys::default(), &["b", "a", "c"]), ["a", "b", "c"]);
    }

    #[test]
    fn test_listed_keys_follow_list() {
        let order = SortedKeys::new(["title", "date", "body"]);
        assert_eq!(
            sorted(&order, &["body", "date", "title"]),
            ["title", "date", "body"]
        );
    }

    #[test]
    fn test_unlisted_key_compares_lexicographically_with_listed_keys() {
        // "a" is unlisted, so it compares by name against both "c" and "b".
        let order = SortedKeys::new(["c", "b"]);
        assert_eq!(sorted(&order, &["b", "a", "c"]), ["a", "c", "b"]);
    }

    #[test]
    fn test_compare() {
        let order = SortedKeys::new(["title", "date"]);
        assert_eq!(order.compare("title", "date"), Ordering::Less);
        assert_eq!(order.compare("date", "title"), Ordering::Greater);
        assert_eq!(order.compare("title", "author"), Ordering::Greater);
        assert_eq!(order.compare("x", "y"), Ordering::Less);
        assert_eq!(order.compare("x", "x"), Ordering::Equal);
    }

    #[test]
    fn test_cyclic_comparator_is_deterministic() {
        // c < a by list, a < b and b < c by name: no total order exists.
        let order = SortedKeys::new(["c", "a"]);
        let first = sorted(&order, &["a", "b", "c"]);
        let second = sorted(&order, &["a", "b", "c"]);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_sort_is_stable() {
        let order = SortedKeys::default();
        let mut entries = vec![("k", 1), ("a", 2), ("k", 3)];
        order.sort_by_name(&mut entries, |e| e.0);
        assert_eq!(entries, vec![("a", 2), ("k", 1), ("k", 3)]);
    }

    #[test]
    fn test_deserialize_from_list() {
        let order: SortedKeys = serde_json::from_str(r#"["title", "date"]"#).unwrap();
        assert_eq!(order, SortedKeys::new(["title", "date"]));
    }
}
