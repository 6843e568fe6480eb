pub mod health;
pub mod mcp;
pub mod metrics;

use ::mcp::McpDispatcher;
use axum::Router;

pub fn get_routes(dispatcher: McpDispatcher) -> Router {
    Router::new()
        .merge(health::get_routes())
        .merge(metrics::get_routes())
        .merge(mcp::get_routes(dispatcher))
}
