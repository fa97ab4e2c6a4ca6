//! CLI argument parsing for relcut.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relcut: release cutting and auto-tagging helper for git repositories.
///
/// `cut` renders the packaging manifest from its template, commits, creates
/// an annotated tag, and pushes it. `autotag` is meant to run as a git
/// post-commit hook and tags commits that change the manifest version.
#[derive(Parser, Debug)]
#[command(name = "relcut")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for relcut.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cut a release: render the manifest, commit, tag, and push.
    ///
    /// Renders the manifest template with the release version, optionally
    /// runs a build command, commits the result, creates an annotated tag
    /// named after the version, and pushes the tag unless --no-push is set.
    Cut(CutArgs),

    /// Detect a manifest version change in the latest commit and tag it.
    ///
    /// Diffs the manifest between the two most recent commits. A confirmed
    /// version change (old line removed, new line added) creates an
    /// annotated tag; a one-sided change prints a warning instead. The tag
    /// is never pushed from this command.
    Autotag(AutotagArgs),
}

/// Arguments for the `cut` command.
#[derive(Parser, Debug)]
pub struct CutArgs {
    /// Folder containing the repository. Defaults to the current directory.
    pub folder: Option<PathBuf>,

    /// Release message used for the annotated tag. Brief description of
    /// what was changed or updated.
    #[arg(short, long)]
    pub message: String,

    /// Version name/number. Defaults to a UTC timestamp version.
    #[arg(short, long)]
    pub version: Option<String>,

    /// Package name substituted into the manifest template.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Build command to run after rendering the manifest.
    #[arg(long)]
    pub build_command: Option<String>,

    /// Do not push the release tag to the remote.
    #[arg(long)]
    pub no_push: bool,
}

/// Arguments for the `autotag` command.
#[derive(Parser, Debug)]
pub struct AutotagArgs {
    /// Folder containing the repository. Defaults to the current directory.
    pub folder: Option<PathBuf>,

    /// Print the detection result as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
