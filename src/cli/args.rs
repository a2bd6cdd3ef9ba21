//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// papyrusdb - an embeddable, single-file JSON document store
#[derive(Parser, Debug)]
#[command(name = "papyrusdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the database file
    #[arg(long, default_value = "./papyrus.db")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert a JSON document into a collection
    Insert {
        collection: String,
        /// Document as a JSON object; an `id` field is generated when absent
        document: String,
    },

    /// Find documents matching a filter
    Find {
        collection: String,
        /// Equality filter as `field=value,field2=value2`; empty matches all
        #[arg(long, default_value = "")]
        filter: String,
        /// Sort results by this field
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },

    /// Fetch a single document by id
    Get { collection: String, id: String },

    /// Shallow-merge a partial document into an existing one
    Update {
        collection: String,
        id: String,
        /// Partial document as a JSON object
        partial: String,
    },

    /// Merge a partial document into every document matching a filter
    UpdateMany {
        collection: String,
        /// Partial document as a JSON object
        partial: String,
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Delete a document by id
    Delete { collection: String, id: String },

    /// Delete every document matching a filter
    DeleteMany {
        collection: String,
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// Count documents, optionally filtered
    Count {
        collection: String,
        #[arg(long, default_value = "")]
        filter: String,
    },

    /// List collection names
    Collections,

    /// Tombstone every document in a collection and remove it
    Drop { collection: String },

    /// Print collection and document counts
    Stats,

    /// Rewrite the log to just the surviving documents
    Compact,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
