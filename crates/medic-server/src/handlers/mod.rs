//! HTTP route handlers for the medic server.

pub mod analyze;
pub mod doctors;

use axum::response::Html;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Static landing page.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
