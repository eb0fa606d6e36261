use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::{router, AppState};
use crate::{
    ai::classifier::testing::{adapter, FixedClassifier},
    analysis::PhishingAnalyzer,
    config::CorsConfig,
};

fn app(analyzer: PhishingAnalyzer) -> Router {
    router(AppState::new(Arc::new(analyzer)), &CorsConfig::default())
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn analyze_rejects_empty_email() {
    let response = app(PhishingAnalyzer::new(None))
        .oneshot(post_json(r#"{"subject":"","body":""}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "الرجاء إدخال موضوع أو محتوى الإيميل");
}

#[tokio::test]
async fn analyze_treats_null_fields_as_empty() {
    let response = app(PhishingAnalyzer::new(None))
        .oneshot(post_json(r#"{"subject":null}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "الرجاء إدخال موضوع أو محتوى الإيميل");
}

#[tokio::test]
async fn analyze_treats_empty_object_as_missing_data() {
    for payload in ["{}", "null", "[]"] {
        let response = app(PhishingAnalyzer::new(None))
            .oneshot(post_json(payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "لم يتم استلام بيانات", "payload {payload}");
    }
}

#[tokio::test]
async fn analyze_rejects_missing_body() {
    let response = app(PhishingAnalyzer::new(None))
        .oneshot(post_json("not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "لم يتم استلام بيانات");
}

#[tokio::test]
async fn analyze_uses_keyword_fallback_without_model() {
    let payload = json!({
        "subject": "Urgent action required",
        "body": "Please verify account details or click here immediately."
    });
    let response = app(PhishingAnalyzer::new(None))
        .oneshot(post_json(&payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["is_phishing"], true);
    assert_eq!(body["confidence"], "عالية");
    assert_eq!(body["confidence_band"], "high");
    assert_eq!(body["model_used"], "Keyword-based (Fallback)");
    assert_eq!(body["model_kind"], "keyword-fallback");
    assert_eq!(
        body["warning_signs"],
        json!(["تحليل بسيط باستخدام الكلمات المفتاحية"])
    );
    assert!(body.get("ml_confidence").is_none());
}

#[tokio::test]
async fn analyze_uses_model_when_loaded() {
    let analyzer = PhishingAnalyzer::new(Some(adapter(FixedClassifier {
        label: 1,
        proba: vec![0.05, 0.95],
    })));
    let response = app(analyzer)
        .oneshot(post_json(r#"{"body":"Your account password expires"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["is_phishing"], true);
    assert_eq!(body["confidence_band"], "very-high");
    assert_eq!(body["confidence"], "عالية جداً");
    assert_eq!(body["ml_confidence"], "95.0%");
    assert_eq!(body["model_kind"], "ml-model");
    assert_eq!(body["model_used"], "ML Model (Naive Bayes)");
    assert_eq!(
        body["warning_signs"],
        json!(["طلب معلومات حساسة", "يتعلق بمعلومات الحساب"])
    );
}

#[tokio::test]
async fn health_reports_model_state() {
    let response = app(PhishingAnalyzer::new(None))
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["model_loaded"], false);
    assert!(body.get("model_name").is_none());

    let analyzer = PhishingAnalyzer::new(Some(adapter(FixedClassifier {
        label: 0,
        proba: vec![1.0, 0.0],
    })));
    let response = app(analyzer)
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["model_name"], "fixed");
}

#[tokio::test]
async fn root_reports_service_info() {
    let response = app(PhishingAnalyzer::new(None))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["service"], "phish-guard-rust");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let response = app(PhishingAnalyzer::new(None))
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "https://mail.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
