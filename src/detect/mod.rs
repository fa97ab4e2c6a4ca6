//! Version-change detection over manifest diffs.
//!
//! The autotag flow diffs the packaging manifest between the two most recent
//! commits and scans the diff line by line for added/removed version-field
//! lines. The scan is deterministic:
//!
//! - Only lines of the exact shape `<sign><spaces>version="<token>"<comma>`
//!   count; everything else in the diff is ignored.
//! - The last match per sign wins. A well-formed single-commit diff contains
//!   at most one removed and one added version line, so this tie-break only
//!   matters for malformed input.

use crate::error::{RelcutError, Result};
use crate::git::GitRunner;
use regex::Regex;
use std::sync::LazyLock;

/// Pattern for a version-field line in a unified diff.
///
/// The quotes and the end anchor are part of the contract: a manifest that
/// spells its version field differently will not fire detection at all.
static VERSION_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?P<sign>[-+])\s*version="(?P<version>\S+)"(,)?$"#)
        .expect("Invalid version line regex")
});

/// Before/after version tokens recovered from a manifest diff.
///
/// Either side may be absent when the diff contained no matching line of
/// that sign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionChange {
    /// Token from the last removed (`-`) version line, if any.
    pub previous: Option<String>,
    /// Token from the last added (`+`) version line, if any.
    pub current: Option<String>,
}

/// Classification of a manifest diff for the tagging decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The manifest did not change between the two commits.
    NoChange,
    /// The manifest changed, but no version-field line was touched.
    Unrelated,
    /// Exactly one side matched. Not a confirmed change; the operator
    /// should tag manually if the version really changed.
    Ambiguous(VersionChange),
    /// Both sides matched: a confirmed version change.
    Confirmed {
        /// The version before the commit.
        previous: String,
        /// The version after the commit, used as the tag name.
        current: String,
    },
}

/// Get the two most recent commit hashes, newest first.
///
/// # Returns
///
/// * `Ok((current, previous))` - The two latest revision identifiers
/// * `Err(RelcutError::HistoryError)` - Fewer than two commits exist
pub fn latest_revisions(git: &dyn GitRunner) -> Result<(String, String)> {
    let output = git.run(&["log", "-n", "2", "--pretty=format:%H"])?;

    let mut hashes = output.stdout.split_whitespace();
    match (hashes.next(), hashes.next()) {
        (Some(current), Some(previous)) => Ok((current.to_string(), previous.to_string())),
        _ => Err(RelcutError::HistoryError(
            "need at least two commits to diff the manifest".to_string(),
        )),
    }
}

/// Get the diff of the manifest file between two revisions.
///
/// An empty result means the file did not change between those revisions;
/// that is not an error.
pub fn manifest_diff(
    git: &dyn GitRunner,
    previous: &str,
    current: &str,
    manifest: &str,
) -> Result<String> {
    let output = git.run(&["diff", previous, current, "--", manifest])?;
    Ok(output.stdout)
}

/// Scan a manifest diff for added/removed version-field lines.
///
/// Lines that do not match the version pattern are ignored. For each sign,
/// the last matching line wins.
pub fn detect_version_change(diff: &str) -> VersionChange {
    let mut change = VersionChange::default();

    for line in diff.lines() {
        let Some(captures) = VERSION_LINE_REGEX.captures(line) else {
            continue;
        };
        let version = captures["version"].to_string();
        match &captures["sign"] {
            "-" => change.previous = Some(version),
            _ => change.current = Some(version),
        }
    }

    change
}

/// Classify a manifest diff for the caller-level tagging decision.
pub fn classify(diff: &str) -> Detection {
    if diff.trim().is_empty() {
        return Detection::NoChange;
    }

    let change = detect_version_change(diff);
    match (&change.previous, &change.current) {
        (Some(previous), Some(current)) => Detection::Confirmed {
            previous: previous.clone(),
            current: current.clone(),
        },
        (None, None) => Detection::Unrelated,
        _ => Detection::Ambiguous(change),
    }
}
