pub mod graph;
pub mod neo4j;
pub mod sanitize;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use graph::{GraphSession, GraphStore, run_in_session};
pub use sanitize::sanitize_cypher;
pub use types::{DatabaseError, QuerySummary, RunSummary};
