use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Entities;
use crate::intent::Intent;
use crate::validation::ValidationRecord;

/// A rendered CLI command with its one-line explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCommand {
    pub command: String,
    pub explanation: String,
}

impl GeneratedCommand {
    pub fn new(command: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            explanation: explanation.into(),
        }
    }
}

/// Which resolver path chose the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// Statistical zero-shot classifier, above the confidence threshold.
    Classifier,
    /// Deterministic pattern matching.
    Rules,
}

/// Full result for one query: command, explanation and validation merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Request ID (UUIDv7 for time-sortability).
    pub id: Uuid,
    /// Original query text.
    pub query: String,
    pub intent: Intent,
    pub entities: Entities,
    pub command: String,
    pub explanation: String,
    pub validation: ValidationRecord,
    /// Resolver path that selected `intent`.
    pub tier: ResolutionTier,
    /// Classifier score, present only when the classifier was consulted and answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

impl GenerateResponse {
    pub fn new(
        query: impl Into<String>,
        intent: Intent,
        entities: Entities,
        generated: GeneratedCommand,
        validation: ValidationRecord,
        tier: ResolutionTier,
        confidence: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            query: query.into(),
            intent,
            entities,
            command: generated.command,
            explanation: generated.explanation,
            validation,
            tier,
            confidence,
            generated_at: Utc::now(),
        }
    }
}
