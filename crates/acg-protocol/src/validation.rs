use serde::{Deserialize, Serialize};

/// Outcome of the heuristic safety check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Command is well-formed for its intent.
    Ok,
    /// Command was produced but still carries a placeholder value.
    Warning,
    /// Intent not recognized; nothing to assess.
    Unknown,
}

/// Risk of running the generated command against a live account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

/// Validation record merged into every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub status: ValidationStatus,
    pub details: String,
    pub risk_level: RiskLevel,
}

impl ValidationRecord {
    pub fn new(status: ValidationStatus, details: impl Into<String>, risk_level: RiskLevel) -> Self {
        Self {
            status,
            details: details.into(),
            risk_level,
        }
    }
}
