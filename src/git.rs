//! Git command runner for relcut.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling. All git operations go through the narrow
//! `GitRunner` trait so the release and autotag pipelines can be exercised
//! against a scripted runner in tests without a real repository.

use crate::error::{RelcutError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    /// Create a new GitOutput from raw output bytes.
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// Narrow interface over the external git binary.
///
/// Each invocation spawns a subprocess and blocks until it exits. There is
/// no retry: release operations mutate shared history, so a failed command
/// aborts the whole run.
pub trait GitRunner {
    /// Run a git command and return its captured output.
    ///
    /// Captured stderr is printed before the result is decided, regardless
    /// of exit status, to aid diagnosis. A non-zero exit is a
    /// `CommandFailure` carrying the original command text.
    fn run(&self, args: &[&str]) -> Result<GitOutput>;

    /// Run a git command and echo its stdout on success.
    fn run_printed(&self, args: &[&str]) -> Result<GitOutput> {
        let output = self.run(args)?;
        if !output.is_empty() {
            println!("{}", output.stdout);
        }
        Ok(output)
    }
}

/// `GitRunner` backed by the system git binary.
///
/// Every command runs with an explicit working directory instead of
/// mutating the process cwd, so there is nothing to restore on any exit
/// path.
#[derive(Debug, Clone)]
pub struct SystemGit {
    repo_dir: PathBuf,
}

impl SystemGit {
    /// Create a runner that executes git commands in `repo_dir`.
    pub fn new<P: AsRef<Path>>(repo_dir: P) -> Self {
        Self {
            repo_dir: repo_dir.as_ref().to_path_buf(),
        }
    }

    /// The directory git commands run in.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<GitOutput> {
        let output = Command::new("git")
            .current_dir(&self.repo_dir)
            .args(args)
            .output()
            .map_err(|e| {
                RelcutError::UserError(format!(
                    "failed to execute git {}: {} (is git installed?)",
                    args.first().unwrap_or(&""),
                    e
                ))
            })?;

        let git_output = GitOutput::from_output(&output);

        // Surface stderr before deciding success or failure.
        if !git_output.stderr.is_empty() {
            eprintln!("{}", git_output.stderr);
        }

        if output.status.success() {
            Ok(git_output)
        } else {
            Err(RelcutError::CommandFailure {
                command: command_text(args),
            })
        }
    }
}

/// Render the command text carried by `CommandFailure`.
fn command_text(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// This works correctly from any location within a git repository.
/// "Not in a git repo" is reported as a clean user error (exit 1), not a
/// command failure (exit 2).
pub fn repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .map_err(|e| {
            RelcutError::UserError(format!("failed to execute git: {} (is git installed?)", e))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(PathBuf::from(&git_output.stdout))
    } else if git_output.stderr.contains("not a git repository") {
        Err(RelcutError::UserError(format!(
            "'{}' is not inside a git repository.",
            cwd.display()
        )))
    } else {
        Err(RelcutError::UserError(format!(
            "git rev-parse failed: {}",
            if git_output.stderr.is_empty() {
                &git_output.stdout
            } else {
                &git_output.stderr
            }
        )))
    }
}
