use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use ndarray::{Array1, Array2};
use phishguard_core::logic::model::{
    ClassifierArtifact, LinearModel, ModelArtifact, ModelPredictor, Predictor, TfidfVectorizer,
    VectorizerConfig,
};
use phishguard_core::logic::training::{self, synthetic_samples, TrainConfig};
use phishguard_core::PredictionService;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState};

const PHISHY: &str = "URGENT: verify your account at http://a.example.test and http://b.example.test";
const BENIGN: &str = "Hi team, lunch on Friday?";

fn heuristic_app() -> Router {
    app_with(PredictionService::heuristic_only(20))
}

fn app_with(service: PredictionService) -> Router {
    create_router(AppState {
        service: Arc::new(service),
        config: Arc::new(Config::default()),
    })
}

fn post_predict(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, req).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn predict_body(text: &str) -> String {
    json!({ "text": text }).to_string()
}

#[tokio::test]
async fn test_predict_phishing_heuristic() {
    let app = heuristic_app();
    let (status, body) = send_json(&app, post_predict(predict_body(PHISHY))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["label"], "PHISHING");
    assert!(body["score"].as_u64().unwrap() >= 40);
}

#[tokio::test]
async fn test_predict_safe_heuristic() {
    let app = heuristic_app();
    let (status, body) = send_json(&app, post_predict(predict_body(BENIGN))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "SAFE");
    assert_eq!(body["score"], 0);
}

#[tokio::test]
async fn test_empty_text_rejected_without_history() {
    let app = heuristic_app();

    for payload in [predict_body(""), "{}".to_string(), r#"{"text": null}"#.to_string()] {
        let (status, body) = send_json(&app, post_predict(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "ok": false, "error": "No text provided." }));
    }

    let (_, history) = send_json(&app, get("/api/history")).await;
    assert_eq!(history["history"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let app = heuristic_app();
    let (status, body) = send_json(&app, post_predict("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Invalid JSON body.");
}

#[tokio::test]
async fn test_body_parsed_without_content_type() {
    let app = heuristic_app();
    let req = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from(predict_body(BENIGN)))
        .unwrap();
    let (status, body) = send_json(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "SAFE");
}

#[tokio::test]
async fn test_history_keeps_last_twenty_most_recent_first() {
    let app = heuristic_app();
    for i in 0..21 {
        let (status, _) = send(&app, post_predict(predict_body(&format!("email number {}", i)))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send_json(&app, get("/api/history")).await;
    assert_eq!(status, StatusCode::OK);

    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 20);
    assert_eq!(history[0]["text"], "email number 20");
    assert_eq!(history[19]["text"], "email number 1");
    assert_eq!(body["buffer"]["capacity"], 20);
}

#[tokio::test]
async fn test_index_lists_history_escaped() {
    let app = heuristic_app();
    send(&app, post_predict(predict_body("first <b>mail</b>"))).await;
    send(&app, post_predict(predict_body("second mail"))).await;

    let (status, bytes) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(bytes).unwrap();
    assert!(html.contains("first &lt;b&gt;mail&lt;/b&gt;"));
    let second = html.find("second mail").unwrap();
    let first = html.find("first &lt;b&gt;").unwrap();
    assert!(second < first);
}

#[tokio::test]
async fn test_health_reports_heuristic_mode() {
    let app = heuristic_app();
    let (status, body) = send_json(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["mode"], "heuristic");
    assert!(body["engine"].is_null());
}

#[tokio::test]
async fn test_predict_with_trained_model() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("phishing_model.json");
    let vectorizer_path = dir.path().join("tfidf_vectorizer.json");
    training::train(&synthetic_samples(), &TrainConfig::default())
        .unwrap()
        .save(&model_path, &vectorizer_path)
        .unwrap();

    let config = Config::default();
    let predictor = ModelPredictor::try_load(&model_path, &vectorizer_path, &config.phishing_labels)
        .map(|p| Box::new(p) as Box<dyn Predictor>);
    assert!(predictor.is_some());
    let app = app_with(PredictionService::new(predictor, config.history_capacity));

    let (status, body) = send_json(&app, post_predict(predict_body(BENIGN))).await;
    assert_eq!(status, StatusCode::OK);
    let score = body["score"].as_u64().unwrap();
    assert!(score <= 100);

    let (_, history) = send_json(&app, get("/api/history")).await;
    assert_eq!(history["history"][0]["source"], "model");

    let (_, health) = send_json(&app, get("/health")).await;
    assert_eq!(health["mode"], "model");
    assert_eq!(health["engine"]["phishing_label"], "phish");
}

#[tokio::test]
async fn test_hard_label_model_returns_null_score() {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("phishing_model.json");
    let vectorizer_path = dir.path().join("tfidf_vectorizer.json");

    let docs = ["verify your account now", "wire transfer urgent"];
    let vectorizer = TfidfVectorizer::fit(&docs[..], &VectorizerConfig::default()).unwrap();
    // any known term pushes the decision above zero, i.e. class "1"
    let classifier = ClassifierArtifact::LinearSvc(LinearModel {
        classes: vec!["0".to_string(), "1".to_string()],
        coef: Array2::from_elem((1, vectorizer.dimension()), 1.0),
        intercept: Array1::from_elem(1, -0.1),
    });
    ModelArtifact::save(&vectorizer, &classifier, &model_path, &vectorizer_path).unwrap();

    let config = Config::default();
    let predictor = ModelPredictor::try_load(&model_path, &vectorizer_path, &config.phishing_labels)
        .map(|p| Box::new(p) as Box<dyn Predictor>);
    assert!(predictor.is_some());
    let app = app_with(PredictionService::new(predictor, config.history_capacity));

    let (status, body) = send_json(&app, post_predict(predict_body("please verify your account"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["label"], "PHISHING");
    assert!(body["score"].is_null());

    let (status, body) = send_json(&app, post_predict(predict_body("zzz qqq"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "SAFE");
    assert!(body["score"].is_null());

    let (_, history) = send_json(&app, get("/api/history")).await;
    assert_eq!(history["history"][0]["source"], "model");
    assert!(history["history"][0]["score"].is_null());
}
