use async_trait::async_trait;
use reqwest::header::LOCATION;
use tracing::{debug, info};

use crate::graph::{GraphSession, GraphStore};
use crate::neo4j::config::Neo4jConfig;
use crate::neo4j::wire::{TransactionRequest, read_response};
use crate::types::{DatabaseError, RunSummary};

/// Neo4j client speaking the HTTP transaction API.
///
/// The underlying `reqwest::Client` keeps a connection pool for the lifetime of
/// the store. Each session is one explicit transaction on the server.
pub struct Neo4jHttpStore {
    client: reqwest::Client,
    config: Neo4jConfig,
}

impl Neo4jHttpStore {
    pub fn new(config: Neo4jConfig) -> Result<Self, DatabaseError> {
        let client = reqwest::Client::builder().build()?;

        info!(
            "Configured Neo4j store at {} (database: {}, user: {})",
            config.uri, config.database, config.user
        );

        Ok(Self { client, config })
    }
}

#[async_trait]
impl GraphStore for Neo4jHttpStore {
    async fn open_session(&self) -> Result<Box<dyn GraphSession>, DatabaseError> {
        let response = self
            .client
            .post(self.config.transaction_endpoint())
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&TransactionRequest::empty())
            .send()
            .await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = read_response(response).await?;

        let transaction_url = location
            .or_else(|| {
                body.commit
                    .as_deref()
                    .and_then(|commit| commit.strip_suffix("/commit"))
                    .map(str::to_string)
            })
            .ok_or_else(|| {
                DatabaseError::Protocol("transaction location missing from response".to_string())
            })?;

        debug!("Opened Neo4j transaction {}", transaction_url);

        Ok(Box::new(Neo4jHttpSession {
            client: self.client.clone(),
            config: self.config.clone(),
            transaction_url,
            failed: false,
            closed: false,
        }))
    }
}

struct Neo4jHttpSession {
    client: reqwest::Client,
    config: Neo4jConfig,
    transaction_url: String,
    failed: bool,
    closed: bool,
}

#[async_trait]
impl GraphSession for Neo4jHttpSession {
    async fn run(&mut self, cypher: &str) -> Result<RunSummary, DatabaseError> {
        if self.closed {
            return Err(DatabaseError::SessionClosed);
        }

        let sent = self
            .client
            .post(&self.transaction_url)
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&TransactionRequest::single(cypher))
            .send()
            .await;

        let outcome = match sent {
            Ok(response) => read_response(response).await,
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(body) => {
                let result = body.results.into_iter().next().unwrap_or_default();
                Ok(RunSummary::new(
                    cypher,
                    &self.config.database,
                    result.columns,
                    result.data.len(),
                    result.stats,
                ))
            }
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    async fn close(&mut self) -> Result<(), DatabaseError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let request = if self.failed {
            debug!("Rolling back Neo4j transaction {}", self.transaction_url);
            self.client.delete(&self.transaction_url)
        } else {
            debug!("Committing Neo4j transaction {}", self.transaction_url);
            self.client
                .post(format!("{}/commit", self.transaction_url))
                .json(&TransactionRequest::empty())
        };

        let response = request
            .basic_auth(&self.config.user, Some(&self.config.password))
            .send()
            .await?;
        read_response(response).await?;

        Ok(())
    }
}
