//! Repository context resolution for relcut.
//!
//! Commands accept an optional folder argument and resolve everything else
//! from it: the repository root, the release config, and the manifest and
//! template paths. Every git command receives the repo root explicitly
//! instead of mutating the process working directory, so there is nothing
//! to restore on any exit path, normal or failed.

use crate::config::ReleaseConfig;
use crate::error::{RelcutError, Result};
use crate::git::{self, SystemGit};
use std::env;
use std::path::{Path, PathBuf};

/// Config file name at the repository root.
pub const CONFIG_FILE: &str = "release.yaml";

/// Resolved paths and config for a release or autotag run.
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    /// Absolute path to the repository root.
    pub repo_root: PathBuf,

    /// Release configuration loaded from `release.yaml` (or defaults).
    pub config: ReleaseConfig,
}

impl ReleaseContext {
    /// Resolve the context from an optional folder argument.
    ///
    /// With no folder, the current working directory is used as the
    /// starting point for repo-root discovery.
    ///
    /// # Returns
    ///
    /// * `Ok(ReleaseContext)` - Successfully resolved context
    /// * `Err(RelcutError::UserError)` - Folder missing, not a git
    ///   repository, or invalid config
    pub fn resolve(folder: Option<&Path>) -> Result<Self> {
        let start = match folder {
            Some(folder) => {
                if !folder.is_dir() {
                    return Err(RelcutError::UserError(format!(
                        "folder '{}' does not exist or is not a directory",
                        folder.display()
                    )));
                }
                folder.to_path_buf()
            }
            None => env::current_dir().map_err(|e| {
                RelcutError::UserError(format!(
                    "failed to get current working directory: {}",
                    e
                ))
            })?,
        };

        let repo_root = git::repo_root(&start)?;
        let config = ReleaseConfig::load_or_default(repo_root.join(CONFIG_FILE))?;

        Ok(Self { repo_root, config })
    }

    /// A git runner scoped to this repository.
    pub fn git(&self) -> SystemGit {
        SystemGit::new(&self.repo_root)
    }

    /// Absolute path to the packaging manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.repo_root.join(&self.config.manifest)
    }

    /// Absolute path to the manifest template.
    pub fn template_path(&self) -> PathBuf {
        self.repo_root.join(self.config.template())
    }
}
