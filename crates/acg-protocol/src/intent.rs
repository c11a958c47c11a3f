use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// AWS service targeted by an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    S3,
    Ec2,
    Dynamodb,
    Iam,
    Lambda,
}

impl Service {
    /// Every supported service, in display order.
    pub const ALL: [Service; 5] = [
        Service::S3,
        Service::Ec2,
        Service::Dynamodb,
        Service::Iam,
        Service::Lambda,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Service::S3 => "s3",
            Service::Ec2 => "ec2",
            Service::Dynamodb => "dynamodb",
            Service::Iam => "iam",
            Service::Lambda => "lambda",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical operation requested by a natural-language query.
///
/// The set is closed: every variant has exactly one command template, and
/// `Unknown` is the sentinel for text nothing recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CreateS3Bucket,
    ListS3Buckets,
    CreateDynamodbTable,
    ListDynamodbTables,
    StartEc2Instance,
    StopEc2Instance,
    ListEc2Instances,
    DescribeEc2Instances,
    CreateIamUser,
    ListIamUsers,
    InvokeLambda,
    ListLambdaFunctions,
    Unknown,
}

impl Intent {
    /// The fixed label set, used as candidate classes for classification.
    pub const ALL: [Intent; 13] = [
        Intent::CreateS3Bucket,
        Intent::ListS3Buckets,
        Intent::CreateDynamodbTable,
        Intent::ListDynamodbTables,
        Intent::StartEc2Instance,
        Intent::StopEc2Instance,
        Intent::ListEc2Instances,
        Intent::DescribeEc2Instances,
        Intent::CreateIamUser,
        Intent::ListIamUsers,
        Intent::InvokeLambda,
        Intent::ListLambdaFunctions,
        Intent::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::CreateS3Bucket => "create_s3_bucket",
            Intent::ListS3Buckets => "list_s3_buckets",
            Intent::CreateDynamodbTable => "create_dynamodb_table",
            Intent::ListDynamodbTables => "list_dynamodb_tables",
            Intent::StartEc2Instance => "start_ec2_instance",
            Intent::StopEc2Instance => "stop_ec2_instance",
            Intent::ListEc2Instances => "list_ec2_instances",
            Intent::DescribeEc2Instances => "describe_ec2_instances",
            Intent::CreateIamUser => "create_iam_user",
            Intent::ListIamUsers => "list_iam_users",
            Intent::InvokeLambda => "invoke_lambda",
            Intent::ListLambdaFunctions => "list_lambda_functions",
            Intent::Unknown => "unknown",
        }
    }

    /// All labels as strings, in `ALL` order.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|i| i.as_str()).collect()
    }

    /// Service this intent operates on. `None` for `Unknown`.
    pub fn service(self) -> Option<Service> {
        match self {
            Intent::CreateS3Bucket | Intent::ListS3Buckets => Some(Service::S3),
            Intent::CreateDynamodbTable | Intent::ListDynamodbTables => Some(Service::Dynamodb),
            Intent::StartEc2Instance
            | Intent::StopEc2Instance
            | Intent::ListEc2Instances
            | Intent::DescribeEc2Instances => Some(Service::Ec2),
            Intent::CreateIamUser | Intent::ListIamUsers => Some(Service::Iam),
            Intent::InvokeLambda | Intent::ListLambdaFunctions => Some(Service::Lambda),
            Intent::Unknown => None,
        }
    }

    /// True for intents whose command only reads account state.
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            Intent::ListS3Buckets
                | Intent::ListDynamodbTables
                | Intent::ListEc2Instances
                | Intent::DescribeEc2Instances
                | Intent::ListIamUsers
                | Intent::ListLambdaFunctions
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label is not one of the known intents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent label: {0}")]
pub struct UnknownIntentLabel(pub String);

impl FromStr for Intent {
    type Err = UnknownIntentLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| UnknownIntentLabel(s.to_string()))
    }
}
