//! Observability utilities
//!
//! Structured logging only; this crate has no metrics or audit
//! surfaces.

mod logger;

pub use logger::{Logger, Severity};
