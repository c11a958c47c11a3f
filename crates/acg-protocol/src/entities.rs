use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Equality filter on a single resource tag (`tag Env=prod`).
///
/// Serialized as a one-entry object: `{"Env": "prod"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct TagFilter {
    pub key: String,
    pub value: String,
}

impl TagFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<TagFilter> for BTreeMap<String, String> {
    fn from(tag: TagFilter) -> Self {
        BTreeMap::from([(tag.key, tag.value)])
    }
}

impl TryFrom<BTreeMap<String, String>> for TagFilter {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "tag filter must have exactly one pair, got {}",
                map.len()
            ));
        }
        let (key, value) = map
            .into_iter()
            .next()
            .ok_or_else(|| "empty tag filter".to_string())?;
        Ok(Self { key, value })
    }
}

/// Values extracted from a query. Every field is optional; consumers fall
/// back to a default when one is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<TagFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl Entities {
    /// Entity names recognized by the resolver and templater.
    pub const KEYS: [&'static str; 7] = [
        "bucket",
        "region",
        "table",
        "instance_id",
        "tag",
        "user",
        "function",
    ];

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Look up a scalar entity by name. `tag` is rendered as `KEY=VALUE`.
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            "bucket" => self.bucket.clone(),
            "region" => self.region.clone(),
            "table" => self.table.clone(),
            "instance_id" => self.instance_id.clone(),
            "tag" => self.tag.as_ref().map(|t| format!("{}={}", t.key, t.value)),
            "user" => self.user.clone(),
            "function" => self.function.clone(),
            _ => None,
        }
    }
}
