//! Statistical intent classification.
//!
//! A classifier only ever supplies the intent label. Entities always come
//! from the rule extractors, whichever path picked the label.

use async_trait::async_trait;

use acg_protocol::Intent;

/// Top-scoring label returned by a classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    /// Score of the top label (0.0 - 1.0).
    pub score: f64,
}

/// Errors from a classifier backend. The resolver logs these and falls back
/// to rules; they never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    Transport(String),
    #[error("classifier returned status {0}")]
    Status(u16),
    #[error("invalid classifier response: {0}")]
    Decode(String),
    #[error("classifier unavailable: {0}")]
    Unavailable(String),
}

/// Trait for zero-shot classifiers that pick one of a fixed set of labels.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classify `text` against `labels`.
    /// Returns `Ok(None)` to abstain (empty result or a label outside the known set).
    async fn classify(
        &self,
        text: &str,
        labels: &[&str],
    ) -> Result<Option<Classification>, ClassifierError>;

    /// Backend name (for logging).
    fn name(&self) -> &str;
}
