//! Validator configuration

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard ceilings enforced by the safety guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    /// Absolute maximum nesting depth
    pub max_depth: usize,

    /// Maximum rules in a single group
    pub max_rules_per_group: usize,

    /// Maximum field path length, in characters
    pub max_field_path_length: usize,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_rules_per_group: 50,
            max_field_path_length: 200,
        }
    }
}

/// Configuration for rule validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Maximum condition nesting depth accepted by full validation
    pub max_depth: usize,

    /// Safety guard ceilings
    pub safety: SafetyLimits,

    /// Run the safety guard on the condition before full payload validation
    pub enforce_safety_limits: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            safety: SafetyLimits::default(),
            enforce_safety_limits: false,
        }
    }
}

impl ValidatorConfig {
    /// Create a configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum depth for full validation
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the safety guard ceilings
    pub fn with_safety_limits(mut self, safety: SafetyLimits) -> Self {
        self.safety = safety;
        self
    }

    /// Gate payload validation on the safety guard
    pub fn enforce_safety_limits(mut self, enforce: bool) -> Self {
        self.enforce_safety_limits = enforce;
        self
    }

    /// Load from an optional `config/validator.{yaml,toml,json}` file and
    /// `RULEGATE_*` environment variables (nested keys separated by `__`,
    /// e.g. `RULEGATE_SAFETY__MAX_DEPTH=8`)
    pub fn load() -> Result<Self> {
        Self::load_from("config/validator")
    }

    /// Load from the given file stem plus environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_string_lossy().into_owned();
        let cfg: Self = config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(
                config::Environment::with_prefix("RULEGATE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(?cfg, "Loaded validator configuration");
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse from YAML text; missing keys take their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject limits that would make every payload invalid
    pub fn validate(&self) -> Result<()> {
        if self.safety.max_rules_per_group == 0 {
            return Err(CoreError::InvalidConfig(
                "safety.max_rules_per_group must be at least 1".to_string(),
            ));
        }
        if self.safety.max_field_path_length == 0 {
            return Err(CoreError::InvalidConfig(
                "safety.max_field_path_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
