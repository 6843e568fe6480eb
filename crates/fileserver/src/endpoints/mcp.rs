use crate::metrics::record_mcp_response;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State, rejection::BytesRejection},
    http::StatusCode,
    routing::post,
};
use mcp::{INVALID_REQUEST, McpDispatcher, McpResponse};
use serde_json::Value;
use tracing::warn;

/// Largest accepted `/mcp` body. `writeFile` content travels inline.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Failures travel inside the envelope, so every `POST /mcp` answers 200.
pub fn get_routes(dispatcher: McpDispatcher) -> Router {
    get_routes_with_limit(dispatcher, MAX_BODY_BYTES)
}

pub fn get_routes_with_limit(dispatcher: McpDispatcher, body_limit: usize) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp).options(handle_preflight))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(dispatcher)
}

async fn handle_mcp(
    State(dispatcher): State<McpDispatcher>,
    body: Result<Bytes, BytesRejection>,
) -> Json<McpResponse> {
    let response = match body {
        Ok(body) => dispatcher.handle_mcp_payload(&body).await,
        Err(rejection) => {
            warn!("[MCP] Rejected request body: {}", rejection.body_text());
            McpResponse::failure(INVALID_REQUEST, rejection.body_text(), Value::Null)
        }
    };
    record_mcp_response(response.is_error());
    Json(response)
}

async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_dispatcher;
    use axum_test::TestServer;
    use serde_json::json;
    use tempfile::TempDir;

    fn server() -> TestServer {
        TestServer::new(get_routes(test_dispatcher())).unwrap()
    }

    #[tokio::test]
    async fn initialize_describes_server() {
        let response = server()
            .post("/mcp")
            .json(&json!({ "method": "initialize", "params": {}, "id": 1 }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], 1);
        assert_eq!(body["result"]["serverName"], "simple-mcp-fileserver");
        assert_eq!(body["result"]["version"], "1.0.0");

        let capabilities = body["result"]["capabilities"].as_object().unwrap();
        let mut names: Vec<&str> = capabilities.keys().map(String::as_str).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "get_weather",
                "listDir",
                "processPdf",
                "readDocx",
                "readExcel",
                "readFile",
                "readPDF",
                "saveToNeo4j",
                "writeFile",
            ]
        );
    }

    #[tokio::test]
    async fn unknown_method_is_reported_in_band() {
        let response = server()
            .post("/mcp")
            .json(&json!({ "method": "deleteFile", "params": { "path": "/" }, "id": "abc" }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "jsonrpc": "2.0",
            "error": { "code": -32601, "message": "Method not found" },
            "id": "abc"
        }));
    }

    #[tokio::test]
    async fn missing_directory_keeps_request_id() {
        let response = server()
            .post("/mcp")
            .json(&json!({ "method": "listDir", "params": { "path": "/tmp/missing" }, "id": 7 }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], 1);
        assert_eq!(body["id"], 7);
        assert!(body.get("result").is_none());
    }

    #[tokio::test]
    async fn null_id_is_echoed() {
        let response = server()
            .post("/mcp")
            .json(&json!({ "method": "initialize", "params": {}, "id": null }))
            .await;

        let body: Value = response.json();
        assert!(body.as_object().unwrap().contains_key("id"));
        assert_eq!(body["id"], Value::Null);
    }

    #[tokio::test]
    async fn lists_directory_over_http() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("report.txt"), "q3").unwrap();

        let response = server()
            .post("/mcp")
            .json(&json!({ "method": "listDir", "params": { "path": dir.path() }, "id": 2 }))
            .await;

        let body: Value = response.json();
        assert_eq!(body["result"], json!(["report.txt"]));
    }

    #[tokio::test]
    async fn upstream_status_becomes_error_code() {
        let response = server()
            .post("/mcp")
            .json(&json!({ "method": "get_weather", "params": { "location": "Oslo" }, "id": 3 }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], 503);
        assert_eq!(body["error"]["message"], "weather service unavailable");
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let response = server()
            .post("/mcp")
            .content_type("application/json")
            .bytes(Bytes::from_static(b"{\"method\": "))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "jsonrpc": "2.0",
            "error": { "code": -32700, "message": "Parse error" },
            "id": null
        }));
    }

    #[tokio::test]
    async fn large_write_fits_within_body_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bulk.txt");
        let content = "x".repeat(3 * 1024 * 1024);
        let server = TestServer::new(crate::build_router(test_dispatcher())).unwrap();

        let response = server
            .post("/mcp")
            .json(&json!({
                "method": "writeFile",
                "params": { "path": path, "content": content },
                "id": 9
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "jsonrpc": "2.0", "result": "ok", "id": 9 }));
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 3 * 1024 * 1024);
    }

    #[tokio::test]
    async fn oversized_body_is_reported_in_band() {
        let server =
            TestServer::new(get_routes_with_limit(test_dispatcher(), 1024)).unwrap();

        let response = server
            .post("/mcp")
            .json(&json!({
                "method": "writeFile",
                "params": { "path": "/tmp/too-big.txt", "content": "y".repeat(4096) },
                "id": 10
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], -32600);
        assert_eq!(body["id"], Value::Null);
        assert!(body.get("result").is_none());
    }

    #[tokio::test]
    async fn preflight_has_empty_body() {
        let response = server().method(http::Method::OPTIONS, "/mcp").await;

        response.assert_status_ok();
        assert!(response.as_bytes().is_empty());
    }

    #[tokio::test]
    async fn health_is_unaffected_by_concurrent_mcp_calls() {
        let server = TestServer::new(crate::build_router(test_dispatcher())).unwrap();

        let mcp_calls = (0..8).map(|id| {
            server
                .post("/mcp")
                .json(&json!({ "method": "listDir", "params": { "path": "/tmp/missing" }, "id": id }))
        });
        let health_calls = (0..8).map(|_| server.get("/health"));

        let (mcp_responses, health_responses) = tokio::join!(
            in_order(mcp_calls),
            in_order(health_calls)
        );

        for (id, response) in mcp_responses.into_iter().enumerate() {
            let body: Value = response.json();
            assert_eq!(body["id"], id);
        }
        for response in health_responses {
            response.assert_status_ok();
            response.assert_text("ok");
        }
    }

    async fn in_order<F>(requests: impl Iterator<Item = F>) -> Vec<F::Output>
    where
        F: std::future::IntoFuture,
    {
        let mut outputs = Vec::new();
        for request in requests {
            outputs.push(request.await);
        }
        outputs
    }
}
