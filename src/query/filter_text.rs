//! Textual filter parsing
//!
//! `field1=value1,field2=value2` becomes an equality filter whose
//! values are strings. Combined with the matcher's coercive textual
//! fallback this lets a string-only caller (the CLI) match numeric and
//! boolean fields. Fragments without a `=` are skipped.

use serde_json::Value;

use crate::document::Filter;

/// Parses a comma-separated `field=value` list into a filter.
pub fn parse_filter_text(input: &str) -> Filter {
    let mut filter = Filter::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        match part.split_once('=') {
            Some((field, value)) => {
                filter.insert(
                    field.trim().to_string(),
                    Value::String(value.trim().to_string()),
                );
            }
            None => continue,
        }
    }

    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pair() {
        let filter = parse_filter_text("name=Alice");
        assert_eq!(filter.len(), 1);
        assert_eq!(filter["name"], "Alice");
    }

    #[test]
    fn test_multiple_pairs() {
        let filter = parse_filter_text("status=active, role=admin");
        assert_eq!(filter["status"], "active");
        assert_eq!(filter["role"], "admin");
    }

    #[test]
    fn test_empty_input_is_empty_filter() {
        assert!(parse_filter_text("").is_empty());
        assert!(parse_filter_text("  ,  ").is_empty());
    }

    #[test]
    fn test_fragment_without_equals_is_skipped() {
        let filter = parse_filter_text("garbage,name=Alice");
        assert_eq!(filter.len(), 1);
        assert_eq!(filter["name"], "Alice");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let filter = parse_filter_text("expr=a=b");
        assert_eq!(filter["expr"], "a=b");
    }
}
