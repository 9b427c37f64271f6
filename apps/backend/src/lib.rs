pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::services::ai::GeminiClient;
use crate::services::extract::MAX_FILE_SIZE;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub ai: Arc<GeminiClient>,
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate", post(routes::generate::generate))
        // Per-file size limits are enforced in the handler; the body limit
        // only needs to admit a few files plus multipart framing
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE * 5))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ai = GeminiClient::from_env();

    let state = AppState { ai: Arc::new(ai) };
    let app = app(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
