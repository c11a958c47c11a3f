//! HTTP client for a zero-shot classification endpoint.
//!
//! Speaks the Hugging Face inference format: the query goes out as
//! `inputs` with the intent labels as `candidate_labels`, and the endpoint
//! answers with labels ranked by score. Any transport or decode failure is
//! reported as a `ClassifierError` so the resolver can fall back to rules.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use acg_protocol::Intent;

use crate::classifier::{Classification, ClassifierError, IntentClassifier};

/// Configuration for the zero-shot classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Whether the classifier is consulted at all.
    #[serde(default)]
    pub enabled: bool,
    /// Full URL of the zero-shot classification endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Minimum top-label score for the classifier to win over rules.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Bearer token sent with each request, if set.
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli".into()
}
fn default_timeout_secs() -> u64 {
    5
}
fn default_threshold() -> f64 {
    0.7
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            threshold: default_threshold(),
            api_token: None,
        }
    }
}

/// Zero-shot request body.
#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
    multi_label: bool,
}

/// Endpoints answer either with parallel ranked arrays or with label/score pairs.
#[derive(Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Ranked {
        labels: Vec<String>,
        scores: Vec<f64>,
    },
    Pairs(Vec<LabelScore>),
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl ZeroShotResponse {
    /// Highest-scoring (label, score), if any.
    fn top(self) -> Option<(String, f64)> {
        match self {
            ZeroShotResponse::Ranked { labels, scores } => labels
                .into_iter()
                .zip(scores)
                .max_by(|a, b| a.1.total_cmp(&b.1)),
            ZeroShotResponse::Pairs(pairs) => pairs
                .into_iter()
                .map(|p| (p.label, p.score))
                .max_by(|a, b| a.1.total_cmp(&b.1)),
        }
    }
}

/// Client for the zero-shot classification endpoint.
pub struct ZeroShotClient {
    client: reqwest::Client,
    config: ClassifierConfig,
}

impl ZeroShotClient {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifierError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

#[async_trait]
impl IntentClassifier for ZeroShotClient {
    async fn classify(
        &self,
        text: &str,
        labels: &[&str],
    ) -> Result<Option<Classification>, ClassifierError> {
        let body = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
                multi_label: false,
            },
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClassifierError::Status(response.status().as_u16()));
        }

        let parsed: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Decode(e.to_string()))?;

        let Some((label, score)) = parsed.top() else {
            return Ok(None);
        };

        match label.parse::<Intent>() {
            Ok(intent) => Ok(Some(Classification { intent, score })),
            Err(_) => {
                tracing::warn!(label = %label, "classifier returned unknown label");
                Ok(None)
            }
        }
    }

    fn name(&self) -> &str {
        "zero-shot"
    }
}
