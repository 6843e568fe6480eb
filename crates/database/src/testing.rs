use crate::graph::{GraphSession, GraphStore};
use crate::types::{DatabaseError, RunSummary};
use async_trait::async_trait;
use serde_json::Map;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StoreState {
    executed: Vec<String>,
    opened: usize,
    closed: usize,
}

/// Graph store that keeps executed statements in memory and counts session lifecycles.
#[derive(Clone, Default)]
pub struct InMemoryGraphStore {
    state: Arc<Mutex<StoreState>>,
    failure_code: Option<String>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `run` fails with a query error carrying `code`.
    pub fn failing(code: &str) -> Self {
        Self {
            failure_code: Some(code.to_string()),
            ..Self::default()
        }
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn opened_sessions(&self) -> usize {
        self.state.lock().unwrap().opened
    }

    pub fn closed_sessions(&self) -> usize {
        self.state.lock().unwrap().closed
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn open_session(&self) -> Result<Box<dyn GraphSession>, DatabaseError> {
        self.state.lock().unwrap().opened += 1;

        Ok(Box::new(InMemoryGraphSession {
            state: Arc::clone(&self.state),
            failure_code: self.failure_code.clone(),
            closed: false,
        }))
    }
}

struct InMemoryGraphSession {
    state: Arc<Mutex<StoreState>>,
    failure_code: Option<String>,
    closed: bool,
}

#[async_trait]
impl GraphSession for InMemoryGraphSession {
    async fn run(&mut self, cypher: &str) -> Result<RunSummary, DatabaseError> {
        if self.closed {
            return Err(DatabaseError::SessionClosed);
        }

        if let Some(code) = &self.failure_code {
            return Err(DatabaseError::Query {
                code: code.clone(),
                message: format!("Statement rejected: {cypher}"),
            });
        }

        self.state.lock().unwrap().executed.push(cypher.to_string());
        Ok(RunSummary::new(cypher, "neo4j", vec![], 0, Map::new()))
    }

    async fn close(&mut self) -> Result<(), DatabaseError> {
        if !self.closed {
            self.closed = true;
            self.state.lock().unwrap().closed += 1;
        }
        Ok(())
    }
}
