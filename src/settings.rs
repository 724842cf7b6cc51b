//! Decoder configuration loaded from TOML.
//!
//! - `parse_config_toml(toml_content)` parses and validates a config
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! Unlike tunables that live behind a process-wide singleton, the parsed
//! [`DecoderConfig`] is passed explicitly into search-space construction;
//! a config error is fatal before any sentence is processed.

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecoderConfig {
    pub decoder: DecoderSettings,
    #[serde(rename = "stage", default)]
    pub stages: Vec<StageConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecoderSettings {
    /// Drop unmatched non-numeric tokens from the translation instead of
    /// copying them through with unknown markers.
    pub drop_unknown: bool,
}

/// Per-stage settings for one decoding step.
#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    /// Maximum options retained per span after pruning. 0 = unlimited.
    pub table_limit: usize,
    /// Attribute slots copied verbatim from the source token when an
    /// option is synthesized for an uncovered position. Everything else
    /// becomes the unknown marker.
    pub pass_through: Vec<usize>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        parse_config_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

impl DecoderConfig {
    /// Single-stage config with the given table limit and surface-only
    /// pass-through.
    pub fn single_stage(table_limit: usize) -> Self {
        Self {
            decoder: DecoderSettings {
                drop_unknown: false,
            },
            stages: vec![StageConfig {
                table_limit,
                pass_through: vec![0],
            }],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "stage".to_string(),
                reason: "at least one stage is required".to_string(),
            });
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if !stage.pass_through.windows(2).all(|w| w[0] < w[1]) {
                return Err(ConfigError::InvalidValue {
                    field: format!("stage[{i}].pass_through"),
                    reason: "slot indices must be strictly increasing".to_string(),
                });
            }
        }
        Ok(())
    }
}

pub fn parse_config_toml(toml_str: &str) -> Result<DecoderConfig, ConfigError> {
    let config: DecoderConfig =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
