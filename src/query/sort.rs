//! Stable field ordering for result sets
//!
//! The ordering is deliberately weak: any pair where either document
//! lacks the sort field compares as equal, so under a stable sort such
//! documents never move relative to their neighbours. Documents that
//! do carry the field compare numerically when both values parse as
//! numbers, otherwise lexicographically on canonical text.

use std::cmp::Ordering;

use serde_json::Value;

use crate::document::{canonical_text, Document};

/// Sort direction for `sort_documents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Stable-sorts `docs` by `field` in the given direction.
pub fn sort_documents(docs: &mut [Document], field: &str, direction: SortDirection) {
    docs.sort_by(|a, b| match (a.get(field), b.get(field)) {
        (Some(x), Some(y)) => {
            let ordering = compare_values(x, y);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
        // Weak ordering: a pair with a missing field never swaps.
        _ => Ordering::Equal,
    });
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (numeric_value(a), numeric_value(b)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    canonical_text(a).cmp(&canonical_text(b))
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d["id"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_sort_ascending_by_number() {
        let mut docs = vec![
            doc(json!({"id": "c", "age": 30})),
            doc(json!({"id": "a", "age": 20})),
            doc(json!({"id": "b", "age": 25})),
        ];

        sort_documents(&mut docs, "age", SortDirection::Ascending);
        assert_eq!(ids(&docs), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_descending() {
        let mut docs = vec![
            doc(json!({"id": "a", "age": 20})),
            doc(json!({"id": "c", "age": 30})),
            doc(json!({"id": "b", "age": 25})),
        ];

        sort_documents(&mut docs, "age", SortDirection::Descending);
        assert_eq!(ids(&docs), ["c", "b", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut docs = vec![
            doc(json!({"id": "a", "age": 25})),
            doc(json!({"id": "b", "age": 25})),
            doc(json!({"id": "c", "age": 25})),
        ];

        sort_documents(&mut docs, "age", SortDirection::Ascending);
        assert_eq!(ids(&docs), ["a", "b", "c"]);
    }

    #[test]
    fn test_numeric_strings_compare_numerically() {
        // "9" sorts before "10" because both parse as numbers.
        let mut docs = vec![
            doc(json!({"id": "a", "rank": "10"})),
            doc(json!({"id": "b", "rank": "9"})),
        ];

        sort_documents(&mut docs, "rank", SortDirection::Ascending);
        assert_eq!(ids(&docs), ["b", "a"]);
    }

    #[test]
    fn test_strings_compare_lexicographically() {
        let mut docs = vec![
            doc(json!({"id": "1", "name": "charlie"})),
            doc(json!({"id": "2", "name": "alice"})),
            doc(json!({"id": "3", "name": "bob"})),
        ];

        sort_documents(&mut docs, "name", SortDirection::Ascending);
        assert_eq!(ids(&docs), ["2", "3", "1"]);
    }

    #[test]
    fn test_missing_field_pairs_keep_relative_order() {
        // The weak-ordering policy: documents without the field compare
        // equal to everything, so a stable sort leaves them where they
        // are even when that produces a sequence that is not globally
        // ordered. The behavior itself is the contract.
        let mut docs = vec![
            doc(json!({"id": "a", "age": 30})),
            doc(json!({"id": "b"})),
            doc(json!({"id": "c", "age": 10})),
        ];

        sort_documents(&mut docs, "age", SortDirection::Ascending);

        // "b" compares equal to both neighbours and never moves.
        assert_eq!(docs[1]["id"], "b");
    }

    #[test]
    fn test_all_missing_field_leaves_order_untouched() {
        let mut docs = vec![
            doc(json!({"id": "x"})),
            doc(json!({"id": "y"})),
            doc(json!({"id": "z"})),
        ];

        sort_documents(&mut docs, "age", SortDirection::Descending);
        assert_eq!(ids(&docs), ["x", "y", "z"]);
    }
}
