pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{analysis::PhishingAnalyzer, config::CorsConfig};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<PhishingAnalyzer>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(analyzer: Arc<PhishingAnalyzer>) -> Self {
        Self {
            analyzer,
            started_at: Utc::now(),
        }
    }
}

pub fn router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/health", get(handlers::health))
        .layer(cors_layer(cors))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(target: "http", origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

#[cfg(test)]
mod tests;
