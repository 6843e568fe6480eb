pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod methods;
pub mod service;
pub mod types;

// Re-export commonly used items for easier importing
pub use dispatch::McpDispatcher;
pub use errors::MethodError;
pub use service::McpServices;
pub use types::*;

pub const MCP_NAME: &str = "simple-mcp-fileserver";
pub const MCP_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Protocol tag reported by `initialize`.
pub const MCP_PROTOCOL: &str = "filesystem";
