pub mod config;
pub mod endpoints;
pub mod metrics;

#[cfg(test)]
pub(crate) mod testing;

use axum::{Router, middleware};
use http::{Method, header};
use mcp::McpDispatcher;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// The complete HTTP surface: routes, request metrics and CORS.
pub fn build_router(dispatcher: McpDispatcher) -> Router {
    endpoints::get_routes(dispatcher)
        .layer(middleware::from_fn(metrics::request_metrics_middleware))
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_dispatcher;
    use axum_test::TestServer;
    use http::HeaderValue;

    #[tokio::test]
    async fn preflight_allows_any_origin() {
        let server = TestServer::new(build_router(test_dispatcher())).unwrap();

        let response = server
            .method(Method::OPTIONS, "/mcp")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://example.com"))
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .add_header(
                header::ACCESS_CONTROL_REQUEST_HEADERS,
                HeaderValue::from_static("content-type"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
        let methods = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(methods.contains("POST"));
        assert!(methods.contains("OPTIONS"));
        assert!(response.text().is_empty());
    }

    #[tokio::test]
    async fn simple_requests_carry_cors_header() {
        let server = TestServer::new(build_router(test_dispatcher())).unwrap();

        let response = server
            .get("/health")
            .add_header(header::ORIGIN, HeaderValue::from_static("http://example.com"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
    }
}
