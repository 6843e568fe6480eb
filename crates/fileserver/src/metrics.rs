use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use lazy_static::lazy_static;
use prometheus::{
    Counter, HistogramVec, IntCounterVec, register_counter, register_histogram_vec,
    register_int_counter_vec,
};
use std::time::Instant;

lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: Counter = register_counter!(
        "fileserver_http_requests_total",
        "Total number of HTTP requests"
    )
    .unwrap();
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "fileserver_http_request_duration_seconds",
        "HTTP request latencies in seconds",
        &["method", "path"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .unwrap();
    pub static ref MCP_RESPONSES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "fileserver_mcp_responses_total",
        "MCP response envelopes by outcome",
        &["outcome"]
    )
    .unwrap();
}

pub async fn request_metrics_middleware(req: Request, next: Next) -> Response {
    HTTP_REQUESTS_TOTAL.inc();

    let method = req.method().to_string();
    // Route templates only, so unknown paths cannot grow the label set.
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &path])
        .observe(duration);

    response
}

pub fn record_mcp_response(is_error: bool) {
    let outcome = if is_error { "error" } else { "result" };
    MCP_RESPONSES_TOTAL.with_label_values(&[outcome]).inc();
}
