//! Canned classifier for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use acg_protocol::Intent;

use crate::classifier::{Classification, ClassifierError, IntentClassifier};

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Answer(Intent, f64),
    Abstain,
    Fail,
}

/// Classifier that always returns the same answer, abstains, or fails.
pub struct MockClassifier {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockClassifier {
    pub fn answering(intent: Intent, score: f64) -> Self {
        Self::with(Behavior::Answer(intent, score))
    }

    pub fn abstaining() -> Self {
        Self::with(Behavior::Abstain)
    }

    pub fn failing() -> Self {
        Self::with(Behavior::Fail)
    }

    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `classify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentClassifier for MockClassifier {
    async fn classify(
        &self,
        _text: &str,
        _labels: &[&str],
    ) -> Result<Option<Classification>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Answer(intent, score) => Ok(Some(Classification { intent, score })),
            Behavior::Abstain => Ok(None),
            Behavior::Fail => Err(ClassifierError::Unavailable("mock failure".into())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
