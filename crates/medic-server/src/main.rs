//! HTTP server entry point and Axum router setup.
//!
//! Builds the generative, places and store clients once from the environment,
//! wires them into the shared state, and serves the API.

mod db;
mod dto;
mod error;
mod handlers;
mod services;
#[cfg(test)]
mod testing;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use medic_config::Settings;
use medic_core::{ConsultationStore, DoctorFinder, SymptomAnalyzer};
use medic_llm::{GenerativeClient, PromptAnalyzer};
use medic_places::PlacesClient;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::db::SqliteConsultationStore;

/// Shared server state accessible from all handlers.
pub struct ServerState {
    pub max_symptom_length: usize,
    pub analyzer: Arc<dyn SymptomAnalyzer>,
    pub doctors: Arc<dyn DoctorFinder>,
    pub store: Arc<dyn ConsultationStore>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let settings = Settings::from_env().context("failed to load settings")?;
    let state = Arc::new(init_server_state(&settings)?);

    info!("Starting server on {}", settings.server_addr);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.server_addr))?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

/// Builds every external client once; handlers share them read-only.
fn init_server_state(settings: &Settings) -> Result<ServerState> {
    let analyzer = PromptAnalyzer::new(GenerativeClient::new(&settings.model));

    if settings.places.api_key.is_empty() {
        warn!("GOOGLE_MAPS_API_KEY is not set; doctor lookups will be rejected by the places service");
    }
    let doctors = PlacesClient::new(&settings.places);
    info!(
        "Doctor search radius: {}m, max symptom length: {}",
        settings.places.radius, settings.max_symptom_length
    );

    let store = SqliteConsultationStore::open(&settings.db_path)?;

    Ok(ServerState {
        max_symptom_length: settings.max_symptom_length,
        analyzer: Arc::new(analyzer),
        doctors: Arc::new(doctors),
        store: Arc::new(store),
    })
}

/// Builds the router over the given state.
pub fn app(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/", get(handlers::index))
        .route("/api/analyze", post(handlers::analyze::analyze))
        .route("/api/doctors", get(handlers::doctors::nearby))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}
