use crate::types::{
    INTERNAL_ERROR, INVALID_PARAMS, LOCAL_FAILURE, METHOD_NOT_FOUND, SERVER_FAILURE,
};
use database::DatabaseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a method call can fail. Each variant maps onto one wire error code.
#[derive(Error, Debug)]
pub enum MethodError {
    #[error("Method not found")]
    MethodNotFound,

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("{0}")]
    Document(String),

    /// The weather provider answered with `status`, or could not be reached (500).
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Database(#[from] DatabaseError),

    /// The external process exited unsuccessfully; the message is its stderr.
    #[error("{0}")]
    Process(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MethodError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MethodError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            MethodError::MethodNotFound => METHOD_NOT_FOUND,
            MethodError::InvalidParams(_) => INVALID_PARAMS,
            MethodError::Io { .. } | MethodError::Document(_) | MethodError::Process(_) => {
                LOCAL_FAILURE
            }
            MethodError::Upstream { status, .. } => i64::from(*status),
            MethodError::Database(_) => SERVER_FAILURE,
            MethodError::Internal(_) => INTERNAL_ERROR,
        }
    }
}
