use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i64 = -32700;
/// The HTTP body could not be read, e.g. it exceeded the size limit.
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
/// Local filesystem, document parsing and subprocess failures.
pub const LOCAL_FAILURE: i64 = 1;
/// Graph database failures, and upstream failures without an HTTP status.
pub const SERVER_FAILURE: i64 = 500;

/// An inbound call. Decoding never fails: anything that is not an object, or
/// lacks a string `method`, becomes a request without a method.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct McpRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Value,
}

impl McpRequest {
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return McpRequest::default();
        }
        let id = value.get("id").cloned().unwrap_or(Value::Null);

        match serde_json::from_value::<McpRequest>(value) {
            Ok(request) => request,
            // e.g. `method` of the wrong type; the id is still echoed back
            Err(_) => McpRequest {
                id,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpError {
    pub code: i64,
    pub message: String,
}

/// Either a result or an error, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(McpError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct McpResponse {
    pub jsonrpc: &'static str,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub id: Value,
}

impl McpResponse {
    pub fn success(result: Value, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            outcome: Outcome::Result(result),
            id,
        }
    }

    pub fn failure(code: i64, message: impl Into<String>, id: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            outcome: Outcome::Error(McpError {
                code,
                message: message.into(),
            }),
            id,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_has_no_error_field() {
        let response = McpResponse::success(json!("ok"), json!(3));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value, json!({ "jsonrpc": "2.0", "result": "ok", "id": 3 }));
    }

    #[test]
    fn failure_envelope_has_no_result_field() {
        let response = McpResponse::failure(METHOD_NOT_FOUND, "Method not found", json!("abc"));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "error": { "code": -32601, "message": "Method not found" },
                "id": "abc"
            })
        );
    }

    #[test]
    fn null_id_is_serialized() {
        let response = McpResponse::success(json!([]), Value::Null);
        let value = serde_json::to_value(&response).unwrap();

        assert!(value.as_object().unwrap().contains_key("id"));
        assert_eq!(value["id"], Value::Null);
    }

    #[test]
    fn request_defaults_missing_fields() {
        let request = McpRequest::from_value(json!({ "method": "listDir" }));

        assert_eq!(request.method.as_deref(), Some("listDir"));
        assert_eq!(request.params, Value::Null);
        assert_eq!(request.id, Value::Null);
    }

    #[test]
    fn malformed_method_keeps_id() {
        let request = McpRequest::from_value(json!({ "method": 42, "id": 9 }));

        assert_eq!(request.method, None);
        assert_eq!(request.id, json!(9));
    }

    #[test]
    fn non_object_body_has_no_method() {
        let request = McpRequest::from_value(json!(["readFile", { "path": "/etc/hosts" }, 1]));

        assert_eq!(request.method, None);
        assert_eq!(request.id, Value::Null);
    }
}
