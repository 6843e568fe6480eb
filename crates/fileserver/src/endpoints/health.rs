use axum::{Router, http::header, routing::get};

pub fn get_routes() -> Router {
    Router::new().route("/health", get(handle_health))
}

// Existing monitors expect a JSON content type around the bare `ok` body.
async fn handle_health() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    ([(header::CONTENT_TYPE, "application/json")], "ok")
}
