//! Release configuration for relcut.
//!
//! An optional `release.yaml` at the repository root configures the package
//! name, manifest/template paths, remote, and staging behavior. Missing
//! file means defaults; CLI flags override config values.

use crate::error::{RelcutError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for release cutting.
///
/// This struct represents the contents of `release.yaml` at the repo root.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Package name substituted into the manifest template.
    pub name: Option<String>,

    /// Path to the packaging manifest, relative to the repo root.
    pub manifest: String,

    /// Path to the manifest template, relative to the repo root.
    /// Defaults to the manifest path with `.in` appended.
    pub template: Option<String>,

    /// Remote that release tags are pushed to.
    pub remote: String,

    /// Paths staged before the release commit.
    pub stage: Vec<String>,

    /// Build command run after rendering the manifest
    /// (e.g. "python setup.py bdist_egg").
    pub build_command: Option<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            name: None,
            manifest: default_manifest(),
            template: None,
            remote: default_remote(),
            stage: default_stage(),
            build_command: None,
        }
    }
}

fn default_manifest() -> String {
    "setup.py".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_stage() -> Vec<String> {
    vec![".".to_string()]
}

impl ReleaseConfig {
    /// Load config from a YAML file, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Returns
    ///
    /// * `Ok(ReleaseConfig)` - Loaded (or default) and validated config
    /// * `Err(RelcutError::UserError)` - Read, parse, or validation failure
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            RelcutError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ReleaseConfig = serde_yaml::from_str(yaml)
            .map_err(|e| RelcutError::UserError(format!("failed to parse release.yaml: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    pub fn validate(&self) -> Result<()> {
        if self.manifest.trim().is_empty() {
            return Err(RelcutError::UserError(
                "config validation failed: manifest must be non-empty".to_string(),
            ));
        }

        if self.remote.trim().is_empty() {
            return Err(RelcutError::UserError(
                "config validation failed: remote must be non-empty".to_string(),
            ));
        }

        if self.stage.iter().any(|path| path.trim().is_empty()) {
            return Err(RelcutError::UserError(
                "config validation failed: stage entries must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The template path, defaulting to `<manifest>.in`.
    pub fn template(&self) -> String {
        self.template
            .clone()
            .unwrap_or_else(|| format!("{}.in", self.manifest))
    }
}
