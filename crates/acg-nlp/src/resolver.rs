//! Intent resolver: classifier first when configured, rules otherwise.
//!
//! The classifier only supplies the label and only when its top score
//! clears the threshold. Entities always come from the rule extractors.

use std::sync::Arc;

use acg_protocol::{Entities, Intent, ResolutionTier};

use crate::classifier::IntentClassifier;
use crate::rules;

/// Default minimum score for a classifier label to be adopted.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Resolver output for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub intent: Intent,
    pub entities: Entities,
    pub tier: ResolutionTier,
    /// Top classifier score, if the classifier answered.
    pub confidence: Option<f64>,
}

/// Turns free text into an intent plus entities. Never fails.
pub struct IntentResolver {
    classifier: Option<Arc<dyn IntentClassifier>>,
    threshold: f64,
}

impl IntentResolver {
    /// Rules-only resolver.
    pub fn new() -> Self {
        Self {
            classifier: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Resolver that consults `classifier` before the rules.
    pub fn with_classifier(classifier: Arc<dyn IntentClassifier>, threshold: f64) -> Self {
        Self {
            classifier: Some(classifier),
            threshold,
        }
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub async fn resolve(&self, text: &str) -> Resolution {
        let text = text.trim();
        let mut confidence = None;

        if let Some(classifier) = &self.classifier {
            match classifier.classify(text, &Intent::labels()).await {
                Ok(Some(top)) => {
                    tracing::info!(
                        classifier = classifier.name(),
                        intent = %top.intent,
                        score = top.score,
                        "classifier answered"
                    );
                    confidence = Some(top.score);
                    if top.score >= self.threshold && top.intent != Intent::Unknown {
                        return Resolution {
                            intent: top.intent,
                            entities: rules::extract_entities(text, top.intent),
                            tier: ResolutionTier::Classifier,
                            confidence,
                        };
                    }
                    tracing::debug!(
                        score = top.score,
                        threshold = self.threshold,
                        "classifier label not adopted, using rules"
                    );
                }
                Ok(None) => {
                    tracing::debug!(classifier = classifier.name(), "classifier abstained");
                }
                Err(e) => {
                    tracing::warn!(
                        classifier = classifier.name(),
                        error = %e,
                        "classification failed, using rules"
                    );
                }
            }
        }

        let (intent, entities) = rules::match_rules(text);
        tracing::info!(intent = %intent, entities = ?entities, "rule intent");
        Resolution {
            intent,
            entities,
            tier: ResolutionTier::Rules,
            confidence,
        }
    }
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockClassifier;

    #[tokio::test]
    async fn rules_only_resolves_example() {
        let resolver = IntentResolver::new();
        let res = resolver
            .resolve("  create an s3 bucket named demo-bucket in us-west-1  ")
            .await;
        assert_eq!(res.intent, Intent::CreateS3Bucket);
        assert_eq!(res.entities.bucket.as_deref(), Some("demo-bucket"));
        assert_eq!(res.entities.region.as_deref(), Some("us-west-1"));
        assert_eq!(res.tier, ResolutionTier::Rules);
        assert!(res.confidence.is_none());
    }

    #[tokio::test]
    async fn confident_classifier_wins_but_entities_come_from_rules() {
        let mock = Arc::new(MockClassifier::answering(Intent::StopEc2Instance, 0.92));
        let resolver = IntentResolver::with_classifier(mock.clone(), DEFAULT_THRESHOLD);

        let res = resolver.resolve("shut down i-0abc in us-east-1").await;
        assert_eq!(res.intent, Intent::StopEc2Instance);
        assert_eq!(res.tier, ResolutionTier::Classifier);
        assert_eq!(res.entities.instance_id.as_deref(), Some("i-0abc"));
        assert_eq!(res.entities.region.as_deref(), Some("us-east-1"));
        assert_eq!(res.confidence, Some(0.92));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn score_equal_to_threshold_is_adopted() {
        let mock = Arc::new(MockClassifier::answering(Intent::ListIamUsers, 0.7));
        let resolver = IntentResolver::with_classifier(mock, 0.7);
        let res = resolver.resolve("who can log in").await;
        assert_eq!(res.intent, Intent::ListIamUsers);
        assert_eq!(res.tier, ResolutionTier::Classifier);
    }

    #[tokio::test]
    async fn low_confidence_falls_back_to_rules() {
        let mock = Arc::new(MockClassifier::answering(Intent::InvokeLambda, 0.4));
        let resolver = IntentResolver::with_classifier(mock, DEFAULT_THRESHOLD);

        let res = resolver.resolve("list dynamodb tables").await;
        assert_eq!(res.intent, Intent::ListDynamodbTables);
        assert_eq!(res.tier, ResolutionTier::Rules);
        assert_eq!(res.confidence, Some(0.4));
    }

    #[tokio::test]
    async fn confident_unknown_falls_back_to_rules() {
        let mock = Arc::new(MockClassifier::answering(Intent::Unknown, 0.99));
        let resolver = IntentResolver::with_classifier(mock, DEFAULT_THRESHOLD);

        let res = resolver.resolve("list iam users").await;
        assert_eq!(res.intent, Intent::ListIamUsers);
        assert_eq!(res.tier, ResolutionTier::Rules);
    }

    #[tokio::test]
    async fn failing_classifier_falls_back_to_rules() {
        let mock = Arc::new(MockClassifier::failing());
        let resolver = IntentResolver::with_classifier(mock.clone(), DEFAULT_THRESHOLD);

        let res = resolver.resolve("describe instance i-0123456789abcdef0").await;
        assert_eq!(res.intent, Intent::DescribeEc2Instances);
        assert_eq!(
            res.entities.instance_id.as_deref(),
            Some("i-0123456789abcdef0")
        );
        assert_eq!(res.tier, ResolutionTier::Rules);
        assert!(res.confidence.is_none());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn abstaining_classifier_falls_back_to_rules() {
        let mock = Arc::new(MockClassifier::abstaining());
        let resolver = IntentResolver::with_classifier(mock, DEFAULT_THRESHOLD);

        let res = resolver.resolve("hello there").await;
        assert_eq!(res.intent, Intent::Unknown);
        assert!(res.entities.is_empty());
    }

    #[tokio::test]
    async fn resolve_is_total() {
        let resolver = IntentResolver::new();
        for text in ["", "   ", "?!", "🚀🚀🚀", "list", "s3", "i-0abc"] {
            let res = resolver.resolve(text).await;
            assert!(Intent::ALL.contains(&res.intent), "{text:?}");
        }
    }
}
