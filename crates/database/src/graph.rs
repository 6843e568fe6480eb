use async_trait::async_trait;
use tracing::{debug, warn};

use crate::types::{DatabaseError, RunSummary};

/// A long-lived handle to a graph database that hands out short-lived sessions.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn GraphSession>, DatabaseError>;
}

/// A unit of work against the database. Callers must `close` every session they open.
#[async_trait]
pub trait GraphSession: Send {
    async fn run(&mut self, cypher: &str) -> Result<RunSummary, DatabaseError>;

    /// Releases the session. Closing an already closed session is a no-op.
    async fn close(&mut self) -> Result<(), DatabaseError>;
}

/// Runs one statement in a fresh session and releases the session on every path.
///
/// A failed run wins over a failed close, so the caller sees the error that
/// actually describes the statement.
pub async fn run_in_session(
    store: &dyn GraphStore,
    cypher: &str,
) -> Result<RunSummary, DatabaseError> {
    let mut session = store.open_session().await?;
    debug!("Opened graph session for statement: {}", cypher);

    let outcome = session.run(cypher).await;
    let closed = session.close().await;

    match (outcome, closed) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(close_error)) => Err(close_error),
        (Err(run_error), Err(close_error)) => {
            warn!("Failed to close graph session after error: {}", close_error);
            Err(run_error)
        }
        (Err(run_error), Ok(())) => Err(run_error),
    }
}
