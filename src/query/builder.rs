//! Fluent filter construction

use serde_json::Value;

use crate::document::Filter;

/// Builds a conjunctive equality filter one field at a time.
///
/// Sugar over inserting into a [`Filter`] by hand; every `eq` adds one
/// required field, and repeating a field keeps the last value.
///
/// ```
/// use papyrusdb::query::FilterBuilder;
///
/// let filter = FilterBuilder::new()
///     .eq("role", "admin")
///     .eq("active", true)
///     .build();
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    filter: Filter,
}

impl FilterBuilder {
    /// Starts an empty filter, which matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `field` to equal `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    /// Finishes the filter.
    pub fn build(self) -> Filter {
        self.filter
    }
}
