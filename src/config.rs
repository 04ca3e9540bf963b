// File: src/config.rs
use crate::core::ranker::{PageRequest, DEFAULT_LIMIT};
use crate::core::resolver::{ResolveOptions, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MAX_PER_INPUT};
use crate::error::{PantryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine tuning, read from a JSON file. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_per_input: usize,
    pub fuzzy_threshold: u8,
    pub fuzzy: bool,
    pub default_limit: usize,
    pub default_min_score: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_per_input: DEFAULT_MAX_PER_INPUT,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            fuzzy: true,
            default_limit: DEFAULT_LIMIT,
            default_min_score: 0.0,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PantryError::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| PantryError::json(path, e))
    }

    /// Like [`EngineConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(PantryError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            max_per_input: self.max_per_input,
            fuzzy_threshold: self.fuzzy_threshold,
            fuzzy: self.fuzzy,
        }
    }

    /// First-page request using the configured defaults, clamped.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.default_limit, 1)
            .with_min_score(self.default_min_score)
            .clamped()
    }
}
