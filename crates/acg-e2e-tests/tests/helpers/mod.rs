//! Shared test harness for E2E integration tests.
//!
//! Builds the real router from an `AppConfig`, so configuration, state
//! construction, resolver, templater and validator all run as in production.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use acg_api::config::AppConfig;
use acg_api::routes::build_router;
use acg_api::state::AppState;

/// End-to-end test harness around the HTTP router.
pub struct TestHarness {
    pub router: Router,
}

impl TestHarness {
    /// Rules-only harness with the fallback default region.
    pub fn rules_only() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Rules-only harness with a different default region.
    pub fn with_region(region: &str) -> Self {
        let mut config = AppConfig::default();
        config.default_region = region.to_string();
        Self::from_config(&config)
    }

    /// Harness whose classifier points at `endpoint` (usually a wiremock server).
    pub fn with_classifier(endpoint: &str, threshold: f64) -> Self {
        let mut config = AppConfig::default();
        config.classifier.enabled = true;
        config.classifier.endpoint = endpoint.to_string();
        config.classifier.timeout_secs = 2;
        config.classifier.threshold = threshold;
        Self::from_config(&config)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            router: build_router(AppState::from_config(config)),
        }
    }

    /// POST /api/v1/generate. Returns (HTTP status code, response JSON body).
    pub async fn generate(&self, query: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "query": query });
        self.send(
            Request::post("/api/v1/generate")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
    }

    /// GET `path`. Returns (HTTP status code, response JSON body).
    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }
}
