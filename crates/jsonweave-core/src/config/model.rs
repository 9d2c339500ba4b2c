use serde::{Deserialize, Serialize};

use crate::cache::CachePolicy;
use crate::error::{RenderError, Result};

/// jsonweave.toml schema - renderer settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub mode: CacheMode,
    /// Only read when `mode = "bounded"`
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            mode: CacheMode::Unbounded,
            capacity: default_capacity(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    #[default]
    Unbounded,
    Bounded,
    Disabled,
}

fn default_capacity() -> usize {
    1024
}

impl CacheConfig {
    /// Translate the file-level settings into a cache policy
    pub fn policy(&self) -> Result<CachePolicy> {
        match self.mode {
            CacheMode::Unbounded => Ok(CachePolicy::Unbounded),
            CacheMode::Disabled => Ok(CachePolicy::Disabled),
            CacheMode::Bounded if self.capacity == 0 => Err(RenderError::Config(
                "cache.capacity must be at least 1 when cache.mode = \"bounded\"".to_string(),
            )),
            CacheMode::Bounded => Ok(CachePolicy::Bounded {
                capacity: self.capacity,
            }),
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RenderConfig = toml::from_str(content)?;
        config.cache.policy()?;
        Ok(config)
    }

    /// Read jsonweave.toml
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}
