//! Configuration for a merge run
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags. Every field has a default matching the usual header
//! layout (`*.h*` files in the root and `crow/`, optional modules in
//! `crow/middlewares/`).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default glob applied to file names in every scanned directory.
pub const DEFAULT_PATTERN: &str = "*.h*";

/// Root structure of an amalgamate TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmalgamateConfig {
    pub collect: CollectConfig,
    pub merge: MergeConfig,
}

/// Which files are candidates for the merge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectConfig {
    /// File name glob, e.g. `*.h*`
    pub pattern: String,
    /// Directories, relative to the input root, whose files are always merged
    pub core_dirs: Vec<String>,
    /// Directory, relative to the input root, holding optional modules
    pub module_dir: Option<String>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            core_dirs: vec![".".to_string(), "crow".to_string()],
            module_dir: Some("crow/middlewares".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub missing_references: MissingReferencePolicy,
}

/// What to do with a quoted include that names a file outside the merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingReferencePolicy {
    /// Drop the edge and report the reference
    #[default]
    Ignore,
    /// Fail the run
    Error,
}

impl AmalgamateConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}
