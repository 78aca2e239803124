//! Binding policy configuration.
//!
//! ```toml
//! fallback = "reject"      # or "use-default"
//! boolean = "strict"       # or "lenient"
//!
//! [formats]
//! date = "%d.%m.%Y"
//! timestamp = "%Y-%m-%d %H:%M:%S %z"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::BooleanPolicy;

/// Environment variable overriding [`BindingConfig::fallback`].
pub const ENV_FALLBACK: &str = "BINDERY_FALLBACK";

/// Environment variable overriding [`BindingConfig::boolean`].
pub const ENV_BOOLEAN: &str = "BINDERY_BOOLEAN";

/// What the binding pipeline does with a recoverable conversion error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Bind the default carried by the error and keep going.
    #[default]
    UseDefault,

    /// Treat every conversion error as a binding failure.
    Reject,
}

impl FallbackPolicy {
    /// Parses the kebab-case name used in config files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "use-default" => Some(Self::UseDefault),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

fn boolean_policy_from_name(name: &str) -> Option<BooleanPolicy> {
    match name.trim().to_ascii_lowercase().as_str() {
        "lenient" => Some(BooleanPolicy::Lenient),
        "strict" => Some(BooleanPolicy::Strict),
        _ => None,
    }
}

/// Default `strftime` patterns for the temporal converters.
///
/// Unset entries fall back to each converter's built-in pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Policies applied when building a registry and binding fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Reaction to recoverable conversion errors.
    pub fallback: FallbackPolicy,

    /// Treatment of unrecognized boolean tokens.
    pub boolean: BooleanPolicy,

    /// Default temporal patterns.
    pub formats: FormatConfig,
}

/// Errors raised while loading a [`BindingConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for this schema.
    #[error("invalid binding config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl BindingConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults overridden by `BINDERY_FALLBACK` and `BINDERY_BOOLEAN`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    ///
    /// Unrecognized values are logged and ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(ENV_FALLBACK) {
            match FallbackPolicy::from_name(&value) {
                Some(policy) => self.fallback = policy,
                None => tracing::warn!(var = ENV_FALLBACK, %value, "ignoring unknown fallback policy"),
            }
        }

        if let Some(value) = lookup(ENV_BOOLEAN) {
            match boolean_policy_from_name(&value) {
                Some(policy) => self.boolean = policy,
                None => tracing::warn!(var = ENV_BOOLEAN, %value, "ignoring unknown boolean policy"),
            }
        }

        self
    }
}
