use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    analysis::AnalysisError,
    domain::{types::format_percent, AnalysisResult, ConfidenceBand, EmailInput, ModelUsed},
};

use super::{error::ApiError, AppState};

/// Both fields are optional; `null` and absent are treated as empty.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl From<AnalyzeRequest> for EmailInput {
    fn from(request: AnalyzeRequest) -> Self {
        EmailInput::new(
            request.subject.unwrap_or_default(),
            request.body.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub is_phishing: bool,
    pub confidence: &'static str,
    pub confidence_band: ConfidenceBand,
    pub reason: String,
    pub warning_signs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ml_confidence: Option<String>,
    pub model_used: &'static str,
    pub model_kind: ModelUsed,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            is_phishing: result.is_phishing,
            confidence: result.confidence_band.label(),
            confidence_band: result.confidence_band,
            reason: result.reason,
            warning_signs: result.warning_signs,
            ml_confidence: result.ml_probability.map(format_percent),
            model_used: result.model_used.label(),
            model_kind: result.model_used,
        }
    }
}

// An empty object counts as no data at all, before field validation.
fn parse_request(payload: Value) -> Result<AnalyzeRequest, ApiError> {
    match &payload {
        Value::Object(fields) if !fields.is_empty() => {}
        _ => return Err(ApiError::missing_body()),
    }
    serde_json::from_value(payload).map_err(|err| {
        tracing::debug!(target: "http", error = %err, "analyze payload has invalid field types");
        ApiError::missing_body()
    })
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "running",
        model_loaded: state.analyzer.model_loaded(),
        model_name: state.analyzer.model_name().map(str::to_string),
        started_at: state.started_at,
    })
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(target: "http", error = %rejection, "rejected analyze payload");
        ApiError::missing_body()
    })?;
    let input = EmailInput::from(parse_request(payload)?);

    let analyzer = Arc::clone(&state.analyzer);
    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&input))
        .await
        .map_err(|err| {
            tracing::error!(target: "analysis", error = %err, "analysis task failed");
            AnalysisError::Internal(err.to_string())
        })??;

    tracing::info!(
        target: "analysis",
        is_phishing = result.is_phishing,
        band = ?result.confidence_band,
        model = ?result.model_used,
        "email analyzed"
    );
    Ok(Json(result.into()))
}
