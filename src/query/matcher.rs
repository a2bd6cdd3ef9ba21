//! Conjunctive equality filter evaluation
//!
//! Every key in the filter must exist in the document and match its
//! expected value; evaluation short-circuits on the first failing key.
//! An empty filter matches everything.
//!
//! Equality is structural first: numbers compare numerically (25
//! matches 25.0), strings, booleans, arrays and objects compare by
//! shape. When the shapes are incompatible the values fall back to
//! comparing their canonical text, which deliberately allows
//! cross-type matches such as a numeric 25 field matching the filter
//! string "25". That coercion is part of the contract, not a bug.

use serde_json::Value;

use crate::document::{canonical_text, Document, Filter};

/// Whether `doc` satisfies every key of `filter`.
pub fn matches_filter(doc: &Document, filter: &Filter) -> bool {
    filter.iter().all(|(field, expected)| {
        doc.get(field)
            .map_or(false, |actual| values_match(actual, expected))
    })
}

/// Whether two values are equal under the document value model.
pub fn values_match(actual: &Value, expected: &Value) -> bool {
    if structural_eq(actual, expected) {
        return true;
    }
    canonical_text(actual) == canonical_text(expected)
}

fn structural_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(xf), Some(yf)) => xf == yf,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| structural_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).map_or(false, |y| structural_eq(x, y)))
        }
        _ => a == b,
    }
}
