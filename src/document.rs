//! Document value model
//!
//! A document is a schema-less JSON object: string keys, values drawn
//! from the full JSON set (string, number, boolean, null, array,
//! object). One key is reserved: the identifier field `id`, which is
//! always present on a stored document and always equals the document's
//! key in its collection map.

use serde_json::{Map, Number, Value};

/// Reserved identifier field present on every stored document.
pub const ID_FIELD: &str = "id";

/// A schema-less document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// A conjunctive equality filter: field name -> expected value.
pub type Filter = Map<String, Value>;

/// Canonical textual form of a JSON value.
///
/// Strings render bare (no quotes), whole-valued floats render without
/// a fractional part so `25.0` and `25` share one canonical form, and
/// everything else renders as compact JSON. This is the form used for
/// coercive cross-type matching and for id canonicalization.
pub fn canonical_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => canonical_number(n),
        other => other.to_string(),
    }
}

fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        // Whole-valued floats inside the exact-integer range of f64
        // print as integers.
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strings_render_bare() {
        assert_eq!(canonical_text(&json!("hello")), "hello");
        assert_eq!(canonical_text(&json!("25")), "25");
    }

    #[test]
    fn test_integers_and_whole_floats_share_a_form() {
        assert_eq!(canonical_text(&json!(25)), "25");
        assert_eq!(canonical_text(&json!(25.0)), "25");
        assert_eq!(canonical_text(&json!(-3.0)), "-3");
    }

    #[test]
    fn test_fractional_floats_keep_their_fraction() {
        assert_eq!(canonical_text(&json!(2.5)), "2.5");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(canonical_text(&json!(true)), "true");
        assert_eq!(canonical_text(&json!(false)), "false");
        assert_eq!(canonical_text(&json!(null)), "null");
    }

    #[test]
    fn test_compound_values_render_as_json() {
        assert_eq!(canonical_text(&json!([1, 2])), "[1,2]");
        assert_eq!(canonical_text(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
