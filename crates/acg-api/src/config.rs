//! Server configuration, loadable from TOML and overridden by environment.
//!
//! Environment overrides:
//! - `AWS_REGION` → `default_region`
//! - `ENABLE_ML` → `classifier.enabled` (`1`, `true`, `yes`)
//! - `ML_CONF_THRESHOLD` → `classifier.threshold`
//! - `HF_API_TOKEN` → `classifier.api_token`

use std::path::Path;

use serde::Deserialize;

use acg_nlp::ClassifierConfig;

/// Region used when neither the request nor the environment names one.
pub const FALLBACK_REGION: &str = "us-west-1";

/// Default config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/defaults.toml";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Region substituted when a request names none.
    #[serde(default = "default_region")]
    pub default_region: String,
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Zero-shot classifier settings. Disabled unless configured.
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_region() -> String {
    FALLBACK_REGION.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            server: ServerConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from a TOML file path. A missing file yields defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Load from `path`, then apply process environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (an environment-like source).
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(region) = lookup("AWS_REGION").filter(|r| !r.trim().is_empty()) {
            self.default_region = region.trim().to_string();
        }

        if let Some(flag) = lookup("ENABLE_ML") {
            self.classifier.enabled = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        if let Some(raw) = lookup("ML_CONF_THRESHOLD") {
            let threshold = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| (0.0..=1.0).contains(t))
                .ok_or(ConfigError::InvalidValue {
                    name: "ML_CONF_THRESHOLD",
                    value: raw.clone(),
                })?;
            self.classifier.threshold = threshold;
        }

        if let Some(token) = lookup("HF_API_TOKEN").filter(|t| !t.is_empty()) {
            self.classifier.api_token = Some(token);
        }

        Ok(())
    }
}
