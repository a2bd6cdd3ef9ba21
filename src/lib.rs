//! papyrusdb - an embeddable, single-file JSON document store
//!
//! Named collections of schema-less JSON documents persisted in one
//! append-only log file. Every mutation is synced to disk before it is
//! acknowledged; reads are served entirely from memory.

pub mod cli;
pub mod collection;
pub mod database;
pub mod document;
pub mod errors;
pub mod observability;
pub mod query;
pub mod storage;
