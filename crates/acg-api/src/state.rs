//! Shared application state for the Axum server.
//!
//! Everything here is built once at startup and read-only afterwards.

use std::sync::Arc;

use acg_commands::{CommandTemplater, HeuristicValidator};
use acg_nlp::{IntentResolver, ZeroShotClient};

use crate::config::{AppConfig, FALLBACK_REGION};
use crate::generator::CliGenerator;

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<CliGenerator>,
}

impl AppState {
    pub fn new(generator: CliGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    /// Rules-only state with the fallback region (for tests and development).
    pub fn with_defaults() -> Self {
        Self::new(CliGenerator::new(
            IntentResolver::new(),
            CommandTemplater::new(FALLBACK_REGION),
            Arc::new(HeuristicValidator::new()),
        ))
    }

    /// Build state from loaded configuration.
    ///
    /// If the classifier is enabled but its client cannot be built, the
    /// server runs rules-only.
    pub fn from_config(config: &AppConfig) -> Self {
        let resolver = if config.classifier.enabled {
            match ZeroShotClient::new(config.classifier.clone()) {
                Ok(client) => {
                    tracing::info!(
                        endpoint = %config.classifier.endpoint,
                        threshold = config.classifier.threshold,
                        "zero-shot classifier enabled"
                    );
                    IntentResolver::with_classifier(Arc::new(client), config.classifier.threshold)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "classifier unavailable, using rules only");
                    IntentResolver::new()
                }
            }
        } else {
            tracing::info!("zero-shot classifier disabled");
            IntentResolver::new()
        };

        Self::new(CliGenerator::new(
            resolver,
            CommandTemplater::new(config.default_region.clone()),
            Arc::new(HeuristicValidator::new()),
        ))
    }

    pub fn classifier_enabled(&self) -> bool {
        self.generator.resolver().has_classifier()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_defaults()
    }
}
