//! Equality matching and ordering over documents
//!
//! The query surface is deliberately small: conjunctive equality
//! filters (written by hand or through [`FilterBuilder`]), a stable
//! field sort with a weak ordering, and a textual filter syntax for
//! string-only callers. There are no range or disjunction operators.

mod builder;
mod filter_text;
mod matcher;
mod sort;

pub use builder::FilterBuilder;
pub use filter_text::parse_filter_text;
pub use matcher::{matches_filter, values_match};
pub use sort::{sort_documents, SortDirection};
