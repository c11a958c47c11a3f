//! Query pipeline: resolve → template → validate → merge.

use std::sync::Arc;

use acg_commands::{CommandTemplater, CommandValidator};
use acg_nlp::IntentResolver;
use acg_protocol::GenerateResponse;

/// Runs one query through the resolver, templater and validator.
pub struct CliGenerator {
    resolver: IntentResolver,
    templater: CommandTemplater,
    validator: Arc<dyn CommandValidator>,
}

impl CliGenerator {
    pub fn new(
        resolver: IntentResolver,
        templater: CommandTemplater,
        validator: Arc<dyn CommandValidator>,
    ) -> Self {
        Self {
            resolver,
            templater,
            validator,
        }
    }

    pub fn resolver(&self) -> &IntentResolver {
        &self.resolver
    }

    pub fn templater(&self) -> &CommandTemplater {
        &self.templater
    }

    /// Produce the full response for `query`. Never fails.
    pub async fn generate(&self, query: &str) -> GenerateResponse {
        let resolution = self.resolver.resolve(query).await;
        let generated = self
            .templater
            .generate(resolution.intent, &resolution.entities);
        let validation = self
            .validator
            .validate(resolution.intent, &resolution.entities);

        tracing::info!(
            intent = %resolution.intent,
            tier = ?resolution.tier,
            command = %generated.command,
            risk = ?validation.risk_level,
            "command generated"
        );

        GenerateResponse::new(
            query,
            resolution.intent,
            resolution.entities,
            generated,
            validation,
            resolution.tier,
            resolution.confidence,
        )
    }
}
