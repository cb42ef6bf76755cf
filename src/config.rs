use std::num::NonZeroUsize;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// History settings, loadable from TOML:
///
/// ```toml
/// max_history_depth = 100   # omit for unbounded history
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Oldest undo entries are dropped once this many are held
    pub max_history_depth: Option<NonZeroUsize>,
}

impl HistoryConfig {
    pub fn unbounded() -> Self {
        Self { max_history_depth: None }
    }

    pub fn with_max_depth(max_history_depth: NonZeroUsize) -> Self {
        Self {
            max_history_depth: Some(max_history_depth),
        }
    }

    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
