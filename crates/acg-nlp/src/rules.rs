//! Rule-based intent matching: ordered regex patterns, first match wins.
//!
//! Matching runs on the lower-cased query. Entity values are captured from
//! the trimmed original text with case-insensitive patterns so they keep the
//! casing the user typed.

use std::sync::LazyLock;

use regex::Regex;

use acg_protocol::{Entities, Intent, TagFilter};

// ── Intent patterns (matched against lower-cased text) ─────────────

static RE_CREATE_S3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:create|make)\b.*\b(?:s3|bucket)\b").unwrap());
static RE_LIST_S3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:list|show)\b.*\b(?:s3|buckets)\b").unwrap());

static RE_CREATE_TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:create|make)\b.*\b(?:dynamo|dynamodb|table)\b").unwrap());
static RE_LIST_TABLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:list|show)\b.*\b(?:dynamo|dynamodb|tables)\b").unwrap());

static RE_START_INSTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:start|run)\b.*\b(?:ec2|instance)\b.*\bi-[0-9a-f]+\b").unwrap()
});
static RE_STOP_INSTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:stop|terminate)\b.*\b(?:ec2|instance)\b.*\bi-[0-9a-f]+\b").unwrap()
});
static RE_DESCRIBE_ONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:describe|show|get)\b.*\b(?:ec2|instance|instances)\b.*\bi-[0-9a-f]+\b")
        .unwrap()
});
static RE_DESCRIBE_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:describe|show|get)\b.*\b(?:ec2|instances)\b").unwrap());
static RE_LIST_INSTANCES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:list|show)\b.*\b(?:ec2|instances)\b").unwrap());

static RE_CREATE_USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:create|add)\b.*\b(?:iam|user)\b").unwrap());
static RE_LIST_USERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:list|show)\b.*\b(?:iam|users)\b").unwrap());

static RE_INVOKE_LAMBDA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:invoke|call)\b.*\blambda\b").unwrap());
static RE_LIST_FUNCTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:list|show)\b.*\b(?:lambda|functions)\b").unwrap());

// ── Entity patterns (matched against original text) ────────────────

static RE_REGION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:in|region)\s+(us-[a-z0-9-]+)").unwrap());
static RE_INSTANCE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(i-[0-9a-f]+)\b").unwrap());
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btag\s+([a-z0-9_\-]+)=([a-z0-9_\-]+)").unwrap());

// S3 bucket names: 3-63 chars, lowercase letters, digits, dots, hyphens.
static BUCKET: LazyLock<NamePattern> =
    LazyLock::new(|| NamePattern::new(r"[a-z0-9][a-z0-9.\-]{2,62}", &["bucket"]));
static TABLE: LazyLock<NamePattern> =
    LazyLock::new(|| NamePattern::new(r"[a-z0-9_.\-]+", &["table"]));
static USER: LazyLock<NamePattern> =
    LazyLock::new(|| NamePattern::new(r"[a-z0-9_+=,.@\-]+", &["user"]));
static FUNCTION: LazyLock<NamePattern> =
    LazyLock::new(|| NamePattern::new(r"[a-z0-9_\-]+", &["function", "lambda"]));

/// Words that follow a resource noun but are never its name.
const FILLER_WORDS: &[&str] = &[
    "a", "an", "and", "at", "called", "for", "from", "function", "in", "named", "of", "on",
    "region", "the", "to", "with",
];

/// Extracts a resource name: `named X` / `called X` first, then `<noun> X`.
struct NamePattern {
    named: Regex,
    nouns: Vec<Regex>,
}

impl NamePattern {
    fn new(name_chars: &str, nouns: &[&str]) -> Self {
        let named = Regex::new(&format!(r"(?i)\b(?:named|called)\s+({name_chars})")).unwrap();
        let nouns = nouns
            .iter()
            .map(|noun| Regex::new(&format!(r"(?i)\b{noun}\s+({name_chars})")).unwrap())
            .collect();
        Self { named, nouns }
    }

    fn extract(&self, text: &str) -> Option<String> {
        std::iter::once(&self.named)
            .chain(self.nouns.iter())
            .find_map(|re| first_name(re, text))
    }
}

/// First capture of `re` in `text` that is not a filler word.
fn first_name(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text).find_map(|caps| {
        let name = caps[1].trim_end_matches(['.', '-']);
        if name.is_empty() || FILLER_WORDS.contains(&name.to_lowercase().as_str()) {
            None
        } else {
            Some(name.to_string())
        }
    })
}

fn extract_region(text: &str) -> Option<String> {
    RE_REGION
        .captures(text)
        .map(|caps| caps[1].trim_end_matches('-').to_string())
}

fn extract_instance_id(text: &str) -> Option<String> {
    RE_INSTANCE_ID.captures(text).map(|caps| caps[1].to_string())
}

fn extract_tag(text: &str) -> Option<TagFilter> {
    RE_TAG
        .captures(text)
        .map(|caps| TagFilter::new(&caps[1], &caps[2]))
}

/// Resolve `text` to an intent and its entities using the ordered rules.
///
/// Total: anything unmatched yields `(Intent::Unknown, Entities::default())`.
pub fn match_rules(text: &str) -> (Intent, Entities) {
    let original = text.trim();
    let lower = original.to_lowercase();
    let region = extract_region(original);

    // ── S3 ──────────────────────────────────────────────────────

    if RE_CREATE_S3.is_match(&lower) {
        return (
            Intent::CreateS3Bucket,
            Entities {
                bucket: BUCKET.extract(original),
                region,
                ..Default::default()
            },
        );
    }

    if RE_LIST_S3.is_match(&lower) {
        return (
            Intent::ListS3Buckets,
            Entities {
                region,
                ..Default::default()
            },
        );
    }

    // ── DynamoDB ────────────────────────────────────────────────

    if RE_CREATE_TABLE.is_match(&lower) {
        return (
            Intent::CreateDynamodbTable,
            Entities {
                table: TABLE.extract(original),
                region,
                ..Default::default()
            },
        );
    }

    if RE_LIST_TABLES.is_match(&lower) {
        return (
            Intent::ListDynamodbTables,
            Entities {
                region,
                ..Default::default()
            },
        );
    }

    // ── EC2 ─────────────────────────────────────────────────────

    for (re, intent) in [
        (&*RE_START_INSTANCE, Intent::StartEc2Instance),
        (&*RE_STOP_INSTANCE, Intent::StopEc2Instance),
        // A concrete instance ID takes priority over the describe-all branch.
        (&*RE_DESCRIBE_ONE, Intent::DescribeEc2Instances),
    ] {
        if re.is_match(&lower) {
            return (
                intent,
                Entities {
                    instance_id: extract_instance_id(original),
                    region,
                    ..Default::default()
                },
            );
        }
    }

    for (re, intent) in [
        (&*RE_DESCRIBE_ALL, Intent::DescribeEc2Instances),
        (&*RE_LIST_INSTANCES, Intent::ListEc2Instances),
    ] {
        if re.is_match(&lower) {
            return (
                intent,
                Entities {
                    region,
                    tag: extract_tag(original),
                    ..Default::default()
                },
            );
        }
    }

    // ── IAM ─────────────────────────────────────────────────────

    if RE_CREATE_USER.is_match(&lower) {
        return (
            Intent::CreateIamUser,
            Entities {
                user: USER.extract(original),
                ..Default::default()
            },
        );
    }

    if RE_LIST_USERS.is_match(&lower) {
        return (Intent::ListIamUsers, Entities::default());
    }

    // ── Lambda ──────────────────────────────────────────────────

    if RE_INVOKE_LAMBDA.is_match(&lower) {
        return (
            Intent::InvokeLambda,
            Entities {
                function: FUNCTION.extract(original),
                region,
                ..Default::default()
            },
        );
    }

    if RE_LIST_FUNCTIONS.is_match(&lower) {
        return (
            Intent::ListLambdaFunctions,
            Entities {
                region,
                ..Default::default()
            },
        );
    }

    (Intent::Unknown, Entities::default())
}

/// Entities for `text` regardless of which intent they belong to.
///
/// Used when the classifier picked the label: the rule that fires may belong
/// to a different intent, so every extractor runs.
pub fn extract_entities(text: &str, intent: Intent) -> Entities {
    let (rule_intent, entities) = match_rules(text);
    if rule_intent == intent {
        return entities;
    }

    let original = text.trim();
    let region = extract_region(original);
    match intent {
        Intent::CreateS3Bucket => Entities {
            bucket: BUCKET.extract(original),
            region,
            ..Default::default()
        },
        Intent::CreateDynamodbTable => Entities {
            table: TABLE.extract(original),
            region,
            ..Default::default()
        },
        Intent::StartEc2Instance | Intent::StopEc2Instance => Entities {
            instance_id: extract_instance_id(original),
            region,
            ..Default::default()
        },
        Intent::DescribeEc2Instances => Entities {
            instance_id: extract_instance_id(original),
            tag: extract_tag(original),
            region,
            ..Default::default()
        },
        Intent::ListEc2Instances => Entities {
            tag: extract_tag(original),
            region,
            ..Default::default()
        },
        Intent::CreateIamUser => Entities {
            user: USER.extract(original),
            ..Default::default()
        },
        Intent::InvokeLambda => Entities {
            function: FUNCTION.extract(original),
            region,
            ..Default::default()
        },
        Intent::ListS3Buckets | Intent::ListDynamodbTables | Intent::ListLambdaFunctions => {
            Entities {
                region,
                ..Default::default()
            }
        }
        Intent::ListIamUsers | Intent::Unknown => Entities::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent_of(text: &str) -> Intent {
        match_rules(text).0
    }

    // ── S3 ──────────────────────────────────────────────────────

    #[test]
    fn create_bucket_named_in_region() {
        let (intent, entities) = match_rules("create an s3 bucket named demo-bucket in us-west-1");
        assert_eq!(intent, Intent::CreateS3Bucket);
        assert_eq!(entities.bucket.as_deref(), Some("demo-bucket"));
        assert_eq!(entities.region.as_deref(), Some("us-west-1"));
        assert!(entities.table.is_none());
    }

    #[test]
    fn create_bucket_noun_form() {
        let (intent, entities) = match_rules("make bucket logs.example-2024");
        assert_eq!(intent, Intent::CreateS3Bucket);
        assert_eq!(entities.bucket.as_deref(), Some("logs.example-2024"));
        assert!(entities.region.is_none());
    }

    #[test]
    fn create_bucket_without_name() {
        let (intent, entities) = match_rules("create a bucket in us-east-2");
        assert_eq!(intent, Intent::CreateS3Bucket);
        assert!(entities.bucket.is_none());
        assert_eq!(entities.region.as_deref(), Some("us-east-2"));
    }

    #[test]
    fn list_buckets() {
        let (intent, entities) = match_rules("list all s3 buckets in us-west-1");
        assert_eq!(intent, Intent::ListS3Buckets);
        assert_eq!(entities.region.as_deref(), Some("us-west-1"));
    }

    #[test]
    fn show_buckets() {
        assert_eq!(intent_of("Show my buckets"), Intent::ListS3Buckets);
    }

    // ── DynamoDB ────────────────────────────────────────────────

    #[test]
    fn list_tables_has_no_entities() {
        let (intent, entities) = match_rules("list dynamodb tables");
        assert_eq!(intent, Intent::ListDynamodbTables);
        assert!(entities.is_empty());
    }

    #[test]
    fn create_table_named_keeps_case() {
        let (intent, entities) =
            match_rules("Create a DynamoDB table named OrdersTable region us-east-1");
        assert_eq!(intent, Intent::CreateDynamodbTable);
        assert_eq!(entities.table.as_deref(), Some("OrdersTable"));
        assert_eq!(entities.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn create_table_noun_form() {
        let (_, entities) = match_rules("create table Users");
        assert_eq!(entities.table.as_deref(), Some("Users"));
    }

    // ── EC2 ─────────────────────────────────────────────────────

    #[test]
    fn start_instance() {
        let (intent, entities) = match_rules("start ec2 instance i-0abc123def in us-west-2");
        assert_eq!(intent, Intent::StartEc2Instance);
        assert_eq!(entities.instance_id.as_deref(), Some("i-0abc123def"));
        assert_eq!(entities.region.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn stop_instance() {
        let (intent, entities) = match_rules("please stop instance i-1234567890abcdef0");
        assert_eq!(intent, Intent::StopEc2Instance);
        assert_eq!(entities.instance_id.as_deref(), Some("i-1234567890abcdef0"));
    }

    #[test]
    fn terminate_maps_to_stop() {
        assert_eq!(
            intent_of("terminate ec2 instance i-0ff"),
            Intent::StopEc2Instance
        );
    }

    #[test]
    fn start_without_id_is_not_start() {
        assert_ne!(intent_of("start ec2 instance"), Intent::StartEc2Instance);
    }

    #[test]
    fn describe_single_instance_takes_priority() {
        let (intent, entities) = match_rules("describe instance i-0123456789abcdef0");
        assert_eq!(intent, Intent::DescribeEc2Instances);
        assert_eq!(entities.instance_id.as_deref(), Some("i-0123456789abcdef0"));
        assert!(entities.tag.is_none());
    }

    #[test]
    fn describe_all_instances() {
        let (intent, entities) = match_rules("describe ec2 instances in us-west-1");
        assert_eq!(intent, Intent::DescribeEc2Instances);
        assert!(entities.instance_id.is_none());
        assert_eq!(entities.region.as_deref(), Some("us-west-1"));
    }

    #[test]
    fn describe_instances_with_tag() {
        let (intent, entities) = match_rules("get ec2 instances with tag Env=Prod");
        assert_eq!(intent, Intent::DescribeEc2Instances);
        assert_eq!(entities.tag, Some(TagFilter::new("Env", "Prod")));
    }

    #[test]
    fn list_instances_with_tag() {
        let (intent, entities) = match_rules("list ec2 instances tag team=web in us-east-1");
        assert_eq!(intent, Intent::ListEc2Instances);
        assert_eq!(entities.tag, Some(TagFilter::new("team", "web")));
        assert_eq!(entities.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn show_instances_prefers_describe() {
        // "show" appears in both the describe and list families; describe is checked first.
        assert_eq!(intent_of("show ec2 instances"), Intent::DescribeEc2Instances);
    }

    // ── IAM ─────────────────────────────────────────────────────

    #[test]
    fn create_user_named() {
        let (intent, entities) = match_rules("create an IAM user named alice.smith");
        assert_eq!(intent, Intent::CreateIamUser);
        assert_eq!(entities.user.as_deref(), Some("alice.smith"));
        assert!(entities.region.is_none());
    }

    #[test]
    fn add_user_noun_form() {
        let (intent, entities) = match_rules("add user deploy-bot");
        assert_eq!(intent, Intent::CreateIamUser);
        assert_eq!(entities.user.as_deref(), Some("deploy-bot"));
    }

    #[test]
    fn list_users() {
        let (intent, entities) = match_rules("list iam users in us-west-1");
        assert_eq!(intent, Intent::ListIamUsers);
        assert!(entities.is_empty());
    }

    // ── Lambda ──────────────────────────────────────────────────

    #[test]
    fn invoke_function_named() {
        let (intent, entities) = match_rules("invoke lambda function named processOrders");
        assert_eq!(intent, Intent::InvokeLambda);
        assert_eq!(entities.function.as_deref(), Some("processOrders"));
    }

    #[test]
    fn invoke_lambda_noun_form() {
        let (_, entities) = match_rules("call lambda resize-images in us-east-1");
        assert_eq!(entities.function.as_deref(), Some("resize-images"));
        assert_eq!(entities.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn invoke_lambda_function_without_name() {
        let (intent, entities) = match_rules("invoke lambda function");
        assert_eq!(intent, Intent::InvokeLambda);
        assert!(entities.function.is_none());
    }

    #[test]
    fn list_functions() {
        let (intent, entities) = match_rules("list lambda functions in us-west-1");
        assert_eq!(intent, Intent::ListLambdaFunctions);
        assert_eq!(entities.region.as_deref(), Some("us-west-1"));
    }

    // ── Unrecognized ────────────────────────────────────────────

    #[test]
    fn unrecognized_returns_unknown() {
        for text in ["hello there", "", "   ", "what time is it", "deploy the app"] {
            let (intent, entities) = match_rules(text);
            assert_eq!(intent, Intent::Unknown, "{text:?}");
            assert!(entities.is_empty());
        }
    }

    #[test]
    fn non_ascii_input_is_total() {
        let (intent, _) = match_rules("créer un seau İİİ ß in us-west-1");
        assert_eq!(intent, Intent::Unknown);
    }

    // ── Helper tests ────────────────────────────────────────────

    #[test]
    fn region_requires_in_or_region() {
        assert_eq!(extract_region("bucket in us-west-1").as_deref(), Some("us-west-1"));
        assert_eq!(
            extract_region("region us-gov-west-1").as_deref(),
            Some("us-gov-west-1")
        );
        assert_eq!(extract_region("bucket us-west-1"), None);
        assert_eq!(extract_region("bucket in eu-west-1"), None);
    }

    #[test]
    fn filler_words_are_skipped() {
        assert_eq!(TABLE.extract("create table in us-east-1"), None);
        assert_eq!(TABLE.extract("create table for Orders"), None);
    }

    #[test]
    fn trailing_punctuation_trimmed() {
        assert_eq!(
            BUCKET.extract("create a bucket named my-data.").as_deref(),
            Some("my-data")
        );
    }

    #[test]
    fn extract_entities_for_classifier_label() {
        // No rule fires here, but the classifier may still say "stop".
        let entities = extract_entities("get rid of i-0abc in us-east-1", Intent::StopEc2Instance);
        assert_eq!(entities.instance_id.as_deref(), Some("i-0abc"));
        assert_eq!(entities.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn extract_entities_matches_rules_when_labels_agree() {
        let text = "create an s3 bucket named demo-bucket in us-west-1";
        assert_eq!(
            extract_entities(text, Intent::CreateS3Bucket),
            match_rules(text).1
        );
    }
}
