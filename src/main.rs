//! Propeller Analytics - Rust/Axum Frontend
//!
//! Presentation layer for UAV propeller performance analysis. Forwards
//! prediction requests to the coefficient model service, recommends a drone
//! category for the result, and serves paginated, exportable views of the
//! experimental and geometrical datasets.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
pub mod dataset;
mod error;
pub mod prediction;
pub mod recommend;
mod sequence;
mod session;
#[cfg(test)]
mod testing;

use config::Config;
use dataset::{DatasetSource, HttpDatasetSource};
use prediction::{HttpPredictionService, PredictionService};
use session::SessionStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub predictor: Arc<dyn PredictionService>,
    pub datasets: Arc<dyn DatasetSource>,
    pub sessions: SessionStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "propeller_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        prediction_url = %config.prediction_url,
        dataset_url = %config.dataset_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Loaded configuration"
    );

    // One client for both services; the timeout bounds every remote call
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to create HTTP client")?;

    let state = AppState {
        predictor: Arc::new(HttpPredictionService::new(
            client.clone(),
            config.prediction_url.clone(),
        )),
        datasets: Arc::new(HttpDatasetSource::new(client, config.dataset_url.clone())),
        sessions: SessionStore::new(config.max_sessions, config.session_idle),
        config: Arc::new(config),
    };

    let app = build_router(state.clone());

    // Start server
    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", state.config.bind_addr))?;
    tracing::info!("Listening on {}", state.config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check and session stats
        .route("/health", get(health_check))
        .route("/health/sessions", get(session_stats))
        // Prediction flow
        .nest("/api/predict", prediction::router())
        .nest("/api/recommend", recommend::router())
        // Dataset explorer sessions
        .nest("/api/sessions", session::router())
        // State and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "propeller-web",
        "version": env!("CARGO_PKG_VERSION"),
        "prediction_service": state.config.prediction_url,
        "dataset_service": state.config.dataset_url,
    }))
}

/// Session statistics endpoint
async fn session_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.sessions.stats().await)
}
