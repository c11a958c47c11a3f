//! Heuristic safety check keyed by intent.
//!
//! Risk levels:
//! - read-only intents (list/describe): low
//! - create bucket/table, start instance, invoke function: medium
//! - stop instance, create IAM user: high
//!
//! Nothing here talks to AWS. A command that still carries a placeholder
//! because an entity was not extracted is flagged as a warning.

use acg_protocol::{Entities, Intent, RiskLevel, ValidationRecord, ValidationStatus};

/// Assesses a resolved intent before its command is shown to the user.
pub trait CommandValidator: Send + Sync {
    fn validate(&self, intent: Intent, entities: &Entities) -> ValidationRecord;
}

/// Lookup-table validator. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicValidator;

impl HeuristicValidator {
    pub fn new() -> Self {
        Self
    }
}

/// Risk of running the command for `intent`.
pub fn risk_level(intent: Intent) -> RiskLevel {
    match intent {
        Intent::ListS3Buckets
        | Intent::ListDynamodbTables
        | Intent::ListEc2Instances
        | Intent::DescribeEc2Instances
        | Intent::ListIamUsers
        | Intent::ListLambdaFunctions => RiskLevel::Low,
        Intent::CreateS3Bucket
        | Intent::CreateDynamodbTable
        | Intent::StartEc2Instance
        | Intent::InvokeLambda => RiskLevel::Medium,
        Intent::StopEc2Instance | Intent::CreateIamUser => RiskLevel::High,
        Intent::Unknown => RiskLevel::Unknown,
    }
}

/// Entity the command for `intent` cannot do without, if any.
fn required_entity(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::CreateS3Bucket => Some("bucket"),
        Intent::CreateDynamodbTable => Some("table"),
        Intent::StartEc2Instance | Intent::StopEc2Instance => Some("instance_id"),
        Intent::CreateIamUser => Some("user"),
        Intent::InvokeLambda => Some("function"),
        _ => None,
    }
}

impl CommandValidator for HeuristicValidator {
    fn validate(&self, intent: Intent, entities: &Entities) -> ValidationRecord {
        let risk = risk_level(intent);

        if intent == Intent::Unknown {
            return ValidationRecord::new(
                ValidationStatus::Unknown,
                "intent not recognized; nothing to validate",
                risk,
            );
        }

        if let Some(name) = required_entity(intent)
            && entities.get(name).is_none()
        {
            return ValidationRecord::new(
                ValidationStatus::Warning,
                format!("{name} not found in request; command contains a placeholder"),
                risk,
            );
        }

        let details = if intent.is_read_only() {
            "read-only operation".to_string()
        } else {
            format!("modifies {} resources; review before running", service_name(intent))
        };
        ValidationRecord::new(ValidationStatus::Ok, details, risk)
    }
}

fn service_name(intent: Intent) -> &'static str {
    intent.service().map(|s| s.as_str()).unwrap_or("unknown")
}
