//! Request and response bodies of the Neo4j HTTP transaction API.

use crate::types::DatabaseError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize)]
pub(crate) struct TransactionRequest<'a> {
    pub(crate) statements: Vec<Statement<'a>>,
}

impl<'a> TransactionRequest<'a> {
    pub(crate) fn empty() -> Self {
        Self { statements: vec![] }
    }

    pub(crate) fn single(statement: &'a str) -> Self {
        Self {
            statements: vec![Statement {
                statement,
                include_stats: true,
            }],
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statement<'a> {
    pub(crate) statement: &'a str,
    pub(crate) include_stats: bool,
}

#[derive(Deserialize, Default, Debug)]
pub(crate) struct TransactionResponse {
    #[serde(default)]
    pub(crate) results: Vec<StatementResult>,
    #[serde(default)]
    pub(crate) errors: Vec<ServerError>,
    #[serde(default)]
    pub(crate) commit: Option<String>,
}

#[derive(Deserialize, Default, Debug)]
pub(crate) struct StatementResult {
    #[serde(default)]
    pub(crate) columns: Vec<String>,
    #[serde(default)]
    pub(crate) data: Vec<Value>,
    #[serde(default)]
    pub(crate) stats: Map<String, Value>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ServerError {
    pub(crate) code: String,
    pub(crate) message: String,
}

/// Decodes a transaction API response. Errors reported in the body take
/// precedence over the HTTP status, since Neo4j reports statement failures
/// with `200 OK`.
pub(crate) async fn read_response(
    response: reqwest::Response,
) -> Result<TransactionResponse, DatabaseError> {
    let status = response.status();
    let body = response.text().await?;

    match serde_json::from_str::<TransactionResponse>(&body) {
        Ok(mut parsed) => {
            if !parsed.errors.is_empty() {
                let error = parsed.errors.remove(0);
                return Err(DatabaseError::Query {
                    code: error.code,
                    message: error.message,
                });
            }

            if !status.is_success() {
                return Err(DatabaseError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(parsed)
        }
        Err(_) if status.is_success() && body.trim().is_empty() => {
            Ok(TransactionResponse::default())
        }
        Err(_) => Err(DatabaseError::Status {
            status: status.as_u16(),
            body,
        }),
    }
}
