use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{code}: {message}")]
    Query { code: String, message: String },
    #[error("Unexpected response from database ({status}): {body}")]
    Status { status: u16, body: String },
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("Session is already closed")]
    SessionClosed,
}

/// Text of the statement a summary belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySummary {
    pub text: String,
}

/// Summary of a single executed statement, shaped after the summary object
/// the official Neo4j drivers hand back from `session.run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub query: QuerySummary,
    /// `r`, `rw` or `s`, following the driver convention.
    pub query_type: String,
    pub counters: Map<String, Value>,
    pub database: String,
    pub columns: Vec<String>,
    pub record_count: usize,
}

impl RunSummary {
    pub fn new(
        text: &str,
        database: &str,
        columns: Vec<String>,
        record_count: usize,
        counters: Map<String, Value>,
    ) -> Self {
        let flag = |key: &str| counters.get(key).and_then(Value::as_bool).unwrap_or(false);

        let query_type = if flag("contains_system_updates") {
            "s"
        } else if flag("contains_updates") {
            "rw"
        } else {
            "r"
        };

        Self {
            query: QuerySummary {
                text: text.to_string(),
            },
            query_type: query_type.to_string(),
            counters,
            database: database.to_string(),
            columns,
            record_count,
        }
    }
}
