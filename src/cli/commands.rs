//! Command dispatch
//!
//! Each invocation opens the database file, runs one operation, prints
//! a JSON result to stdout, and closes. Durability is per operation, so
//! there is nothing to flush beyond what the operation itself synced.

use serde_json::json;

use crate::cli::args::{Cli, Command};
use crate::cli::errors::{CliError, CliResult};
use crate::database::Database;
use crate::document::{Document, Filter};
use crate::query::{parse_filter_text, sort_documents, SortDirection};

/// Parses arguments, runs the selected command, prints the result.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let db = Database::open(&cli.file)?;
    let result = dispatch(&db, cli.command);
    db.close();

    let output = result?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn dispatch(db: &Database, command: Command) -> CliResult<serde_json::Value> {
    match command {
        Command::Insert {
            collection,
            document,
        } => {
            let doc = parse_document(&document)?;
            let id = db.collection(&collection).insert(doc)?;
            Ok(json!({ "inserted": id }))
        }

        Command::Find {
            collection,
            filter,
            sort,
            desc,
        } => {
            let filter = parse_filter(&filter)?;
            let mut docs = db.collection(&collection).find(&filter);
            if let Some(field) = sort {
                let direction = if desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                sort_documents(&mut docs, &field, direction);
            }
            Ok(json!(docs))
        }

        Command::Get { collection, id } => match db.collection(&collection).find_by_id(&id) {
            Some(doc) => Ok(json!(doc)),
            None => Ok(serde_json::Value::Null),
        },

        Command::Update {
            collection,
            id,
            partial,
        } => {
            let partial = parse_document(&partial)?;
            db.collection(&collection).update(&id, &partial)?;
            Ok(json!({ "updated": id }))
        }

        Command::UpdateMany {
            collection,
            partial,
            filter,
        } => {
            let partial = parse_document(&partial)?;
            let filter = parse_filter(&filter)?;
            let count = db.collection(&collection).update_many(&filter, &partial)?;
            Ok(json!({ "updated": count }))
        }

        Command::Delete { collection, id } => {
            db.collection(&collection).delete(&id)?;
            Ok(json!({ "deleted": id }))
        }

        Command::DeleteMany { collection, filter } => {
            let filter = parse_filter(&filter)?;
            let count = db.collection(&collection).delete_many(&filter)?;
            Ok(json!({ "deleted": count }))
        }

        Command::Count { collection, filter } => {
            let filter = parse_filter(&filter)?;
            let count = db.collection(&collection).count_where(&filter);
            Ok(json!({ "count": count }))
        }

        Command::Collections => {
            let mut names = db.list_collections();
            names.sort();
            Ok(json!(names))
        }

        Command::Drop { collection } => {
            db.drop_collection(&collection)?;
            Ok(json!({ "dropped": collection }))
        }

        Command::Stats => Ok(json!(db.stats())),

        Command::Compact => {
            db.compact()?;
            Ok(json!({ "compacted": true }))
        }
    }
}

/// A document argument must be a JSON object, not any other JSON value.
fn parse_document(raw: &str) -> CliResult<Document> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CliError::invalid_input(format!("not valid JSON: {}", e)))?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(CliError::invalid_input(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn parse_filter(raw: &str) -> CliResult<Filter> {
    Ok(parse_filter_text(raw))
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
