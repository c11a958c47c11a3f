//! Intent resolution for the AWS CLI generator.
//!
//! Converts request text ("list all s3 buckets in us-west-1") into an
//! `Intent` plus extracted `Entities`.
//!
//! Two paths:
//! - **Classifier** (optional): a zero-shot model picks the label when it is confident.
//! - **Rules** (always available): ordered regex patterns, also the only entity source.

pub mod classifier;
pub mod mock;
pub mod resolver;
pub mod rules;
pub mod zero_shot;

pub use classifier::{Classification, ClassifierError, IntentClassifier};
pub use mock::MockClassifier;
pub use resolver::{DEFAULT_THRESHOLD, IntentResolver, Resolution};
pub use rules::{extract_entities, match_rules};
pub use zero_shot::{ClassifierConfig, ZeroShotClient};
