use crate::methods::MethodName;
use crate::{MCP_NAME, MCP_PROTOCOL, MCP_VERSION};
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;

/// Static capability descriptor. Lists every callable method except `initialize` itself.
pub fn initialize() -> Value {
    let capabilities: Map<String, Value> = MethodName::iter()
        .filter(|method| *method != MethodName::Initialize)
        .map(|method| {
            (
                method.to_string(),
                json!({
                    "supported": true,
                    "description": method.description(),
                    "readOnly": method.read_only(),
                }),
            )
        })
        .collect();

    json!({
        "capabilities": capabilities,
        "serverName": MCP_NAME,
        "version": MCP_VERSION,
        "mcp": MCP_PROTOCOL,
    })
}
