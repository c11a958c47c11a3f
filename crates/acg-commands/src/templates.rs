//! AWS CLI command templates, one per intent.
//!
//! Every intent maps to exactly one arm of `CommandTemplater::generate`.
//! Absent entities fall back to fixed defaults; absent regions fall back to
//! the templater's configured default region.

use acg_protocol::{Entities, GeneratedCommand, Intent, Service};

pub const DEFAULT_BUCKET: &str = "<bucket-name>";
pub const DEFAULT_TABLE: &str = "MyTable";
pub const DEFAULT_INSTANCE_ID: &str = "<instance-id>";
pub const DEFAULT_USER: &str = "NewUser";
pub const DEFAULT_FUNCTION: &str = "<function-name>";

pub const UNSUPPORTED_COMMAND: &str = "echo 'Unsupported intent'";

const INSTANCE_SUMMARY_QUERY: &str = "'Reservations[*].Instances[*].[InstanceId,State.Name,Tags]'";

/// Services with at least one command template.
pub fn supported_services() -> &'static [Service] {
    &Service::ALL
}

/// Renders commands for resolved intents.
#[derive(Debug, Clone)]
pub struct CommandTemplater {
    default_region: String,
}

impl CommandTemplater {
    pub fn new(default_region: impl Into<String>) -> Self {
        Self {
            default_region: default_region.into(),
        }
    }

    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    fn region<'a>(&'a self, entities: &'a Entities) -> &'a str {
        entities.region.as_deref().unwrap_or(&self.default_region)
    }

    /// Render the command and explanation for `intent`. Total over all intents.
    pub fn generate(&self, intent: Intent, entities: &Entities) -> GeneratedCommand {
        let region = self.region(entities);

        match intent {
            // ── S3 ──────────────────────────────────────────────
            Intent::CreateS3Bucket => {
                let bucket = entities.bucket.as_deref().unwrap_or(DEFAULT_BUCKET);
                GeneratedCommand::new(
                    format!("aws s3 mb s3://{bucket} --region {region}"),
                    format!("Creates an S3 bucket named '{bucket}' in {region}."),
                )
            }
            Intent::ListS3Buckets => GeneratedCommand::new(
                "aws s3 ls",
                "Lists all S3 buckets in the account.",
            ),

            // ── DynamoDB ────────────────────────────────────────
            Intent::CreateDynamodbTable => {
                let table = entities.table.as_deref().unwrap_or(DEFAULT_TABLE);
                GeneratedCommand::new(
                    format!(
                        "aws dynamodb create-table --table-name {table} \
                         --attribute-definitions AttributeName=Id,AttributeType=S \
                         --key-schema AttributeName=Id,KeyType=HASH \
                         --billing-mode PAY_PER_REQUEST --region {region}"
                    ),
                    format!(
                        "Creates a DynamoDB table named '{table}' in {region} with on-demand billing."
                    ),
                )
            }
            Intent::ListDynamodbTables => {
                GeneratedCommand::new("aws dynamodb list-tables", "Lists DynamoDB tables.")
            }

            // ── EC2 ─────────────────────────────────────────────
            Intent::StartEc2Instance => {
                let id = entities.instance_id.as_deref().unwrap_or(DEFAULT_INSTANCE_ID);
                GeneratedCommand::new(
                    format!("aws ec2 start-instances --instance-ids {id} --region {region}"),
                    format!("Starts EC2 instance {id} in {region}."),
                )
            }
            Intent::StopEc2Instance => {
                let id = entities.instance_id.as_deref().unwrap_or(DEFAULT_INSTANCE_ID);
                GeneratedCommand::new(
                    format!("aws ec2 stop-instances --instance-ids {id} --region {region}"),
                    format!("Stops EC2 instance {id} in {region}."),
                )
            }
            Intent::DescribeEc2Instances => {
                if let Some(id) = entities.instance_id.as_deref() {
                    GeneratedCommand::new(
                        format!("aws ec2 describe-instances --instance-ids {id} --region {region}"),
                        format!("Describes EC2 instance {id} in {region}."),
                    )
                } else if let Some(tag) = &entities.tag {
                    GeneratedCommand::new(
                        format!(
                            "aws ec2 describe-instances --filters Name=tag:{},Values={} --region {region}",
                            tag.key, tag.value
                        ),
                        format!(
                            "Describes EC2 instances tagged {}={} in {region}.",
                            tag.key, tag.value
                        ),
                    )
                } else {
                    GeneratedCommand::new(
                        format!("aws ec2 describe-instances --region {region}"),
                        format!("Describes all EC2 instances in {region}."),
                    )
                }
            }
            Intent::ListEc2Instances => match &entities.tag {
                Some(tag) => GeneratedCommand::new(
                    format!(
                        "aws ec2 describe-instances --filters Name=tag:{},Values={} \
                         --query {INSTANCE_SUMMARY_QUERY} --region {region}",
                        tag.key, tag.value
                    ),
                    format!(
                        "Lists IDs, states and tags of EC2 instances tagged {}={} in {region}.",
                        tag.key, tag.value
                    ),
                ),
                None => GeneratedCommand::new(
                    format!(
                        "aws ec2 describe-instances --query {INSTANCE_SUMMARY_QUERY} --region {region}"
                    ),
                    format!("Lists IDs, states and tags of EC2 instances in {region}."),
                ),
            },

            // ── IAM ─────────────────────────────────────────────
            Intent::CreateIamUser => {
                let user = entities.user.as_deref().unwrap_or(DEFAULT_USER);
                GeneratedCommand::new(
                    format!("aws iam create-user --user-name {user}"),
                    format!("Creates IAM user {user}."),
                )
            }
            Intent::ListIamUsers => {
                GeneratedCommand::new("aws iam list-users", "Lists IAM users in the account.")
            }

            // ── Lambda ──────────────────────────────────────────
            Intent::InvokeLambda => {
                let function = entities.function.as_deref().unwrap_or(DEFAULT_FUNCTION);
                GeneratedCommand::new(
                    format!(
                        "aws lambda invoke --function-name {function} out.json \
                         --cli-binary-format raw-in-base64-out"
                    ),
                    format!("Invokes Lambda function '{function}' and writes the result to out.json."),
                )
            }
            Intent::ListLambdaFunctions => GeneratedCommand::new(
                format!("aws lambda list-functions --region {region}"),
                format!("Lists Lambda functions in {region}."),
            ),

            Intent::Unknown => {
                tracing::warn!(intent = %intent, "unsupported intent");
                GeneratedCommand::new(UNSUPPORTED_COMMAND, "Intent not supported.")
            }
        }
    }
}
