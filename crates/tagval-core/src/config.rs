//! # Validator Configuration
//!
//! Names the struct tag keys the engine reads and bounds traversal depth.
//! Defaults match the conventional `is` rule tag and `json` naming tag.
//! Override via environment variables or a YAML document.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default tag key holding rule expressions.
pub const DEFAULT_TAG_KEY: &str = "is";

/// Default tag key holding the external (serialized) field name.
pub const DEFAULT_NAME_KEY: &str = "json";

/// Default maximum traversal depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration shared by the walker and the validation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Struct tag key whose value is parsed as a rule set.
    pub tag_key: String,
    /// Struct tag key whose first component is the field's external name.
    pub name_key: String,
    /// Maximum nesting depth before traversal fails.
    pub max_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            name_key: DEFAULT_NAME_KEY.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `TAGVAL_TAG_KEY` (default: `is`)
    /// - `TAGVAL_NAME_KEY` (default: `json`)
    /// - `TAGVAL_MAX_DEPTH` (default: 256)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Absent variables keep their defaults; present-but-empty keys and
    /// unparseable depths are rejected.
    pub fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(tag_key) = non_empty(&lookup, "TAGVAL_TAG_KEY")? {
            config.tag_key = tag_key;
        }
        if let Some(name_key) = non_empty(&lookup, "TAGVAL_NAME_KEY")? {
            config.name_key = name_key;
        }
        if let Some(raw) = non_empty(&lookup, "TAGVAL_MAX_DEPTH")? {
            config.max_depth = raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "TAGVAL_MAX_DEPTH",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }
}

fn non_empty(
    lookup: &impl Fn(&'static str) -> Option<String>,
    var: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}
