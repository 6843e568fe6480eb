use crate::errors::MethodError;
use crate::methods::{MethodCall, MethodName};
use crate::service::McpServices;
use crate::types::{McpRequest, McpResponse, PARSE_ERROR};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns one request into exactly one response envelope.
#[derive(Clone)]
pub struct McpDispatcher {
    services: Arc<McpServices>,
}

impl McpDispatcher {
    pub fn new(services: McpServices) -> Self {
        Self {
            services: Arc::new(services),
        }
    }

    /// Entry point for a raw HTTP body. Bodies that are not JSON get a parse
    /// error envelope with a `null` id.
    pub async fn handle_mcp_payload(&self, body: &[u8]) -> McpResponse {
        match serde_json::from_slice::<Value>(body) {
            Ok(request) => self.handle_mcp_request(request).await,
            Err(e) => {
                warn!("[MCP] Failed to parse request body: {}.", e);
                McpResponse::failure(PARSE_ERROR, "Parse error", Value::Null)
            }
        }
    }

    pub async fn handle_mcp_request(&self, request: Value) -> McpResponse {
        debug!("[MCP] Received request: {}.", request);

        let McpRequest { method, params, id } = McpRequest::from_value(request);

        let outcome = match MethodName::resolve(method.as_deref())
            .and_then(|name| MethodCall::parse(name, params))
        {
            Ok(call) => {
                info!("[MCP] Calling {} (id: {}).", call.name(), id);
                self.execute(call).await
            }
            Err(error) => Err(error),
        };

        let response = match outcome {
            Ok(result) => McpResponse::success(result, id),
            Err(error) => {
                warn!(
                    "[MCP] {} failed (id: {}): {}.",
                    method.as_deref().unwrap_or("<missing method>"),
                    id,
                    error
                );
                McpResponse::failure(error.code(), error.to_string(), id)
            }
        };

        debug!("[MCP] Responding: {:?}.", response);
        response
    }

    // The handler runs on its own task: it finishes even if the caller goes
    // away, and a panic inside it still produces an envelope.
    async fn execute(&self, call: MethodCall) -> Result<Value, MethodError> {
        let services = Arc::clone(&self.services);

        tokio::spawn(async move { services.call(call).await })
            .await
            .map_err(|e| MethodError::Internal(e.to_string()))?
    }
}
