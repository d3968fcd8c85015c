use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Engine-owned tags that may be attached to check samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemTag {
    Group,
    Check,
    Vu,
    Iteration,
}

impl SystemTag {
    pub fn key(&self) -> &'static str {
        match self {
            SystemTag::Group => "group",
            SystemTag::Check => "check",
            SystemTag::Vu => "vu",
            SystemTag::Iteration => "iter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Concurrent logical units.
    pub vus: usize,
    /// Iterations of the script per unit.
    pub iterations: usize,
    pub group_separator: String,
    pub system_tags: Vec<SystemTag>,
    /// Tags added to every sample. Tags passed to `check` take precedence.
    pub tags: BTreeMap<String, String>,
    /// When false, `sleep` returns immediately.
    pub sleep: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vus: 1,
            iterations: 1,
            group_separator: "::".to_string(),
            system_tags: vec![SystemTag::Group, SystemTag::Check],
            tags: BTreeMap::new(),
            sleep: true,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&src),
            Some("json") => Self::from_json_str(&src),
            _ => Err(ConfigError::UnknownFormat { path: display }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vus == 0 {
            return Err(ConfigError::Invalid {
                field: "vus",
                reason: "must be at least 1".into(),
            });
        }
        if self.iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "iterations",
                reason: "must be at least 1".into(),
            });
        }
        if self.group_separator.is_empty() {
            return Err(ConfigError::Invalid {
                field: "group_separator",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    pub fn has_system_tag(&self, tag: SystemTag) -> bool {
        self.system_tags.contains(&tag)
    }
}
