//! The `autotag` command: post-commit version-change tagging.
//!
//! Diffs the manifest between the two most recent commits and tags the
//! current commit when a confirmed version change is found. The tag is
//! deliberately not pushed from here: a hook should not surprise the
//! operator with remote pushes, so the push commands are printed instead.

use crate::cli::AutotagArgs;
use crate::context::ReleaseContext;
use crate::detect::{self, Detection};
use crate::error::{RelcutError, Result};
use crate::git::GitRunner;
use serde::Serialize;

/// Machine-readable detection result for `--json`.
#[derive(Debug, Serialize)]
struct DetectionReport<'a> {
    manifest: &'a str,
    current_commit: &'a str,
    previous_commit: &'a str,
    outcome: &'static str,
    previous_version: Option<&'a str>,
    current_version: Option<&'a str>,
    tagged: bool,
}

/// Run the autotag pipeline.
pub fn cmd_autotag(args: AutotagArgs) -> Result<()> {
    let ctx = ReleaseContext::resolve(args.folder.as_deref())?;
    let git = ctx.git();
    let manifest = ctx.config.manifest.as_str();
    let remote = ctx.config.remote.as_str();

    let (current, previous) = detect::latest_revisions(&git)?;
    let diff = detect::manifest_diff(&git, &previous, &current, manifest)?;
    let detection = detect::classify(&diff);

    let mut tagged = false;
    match &detection {
        Detection::NoChange => {
            if !args.json {
                println!("No change to {} in the latest commit.", manifest);
            }
        }
        Detection::Unrelated => {
            if !args.json {
                println!(
                    "{} changed, but no version field change was detected.",
                    manifest
                );
            }
        }
        Detection::Ambiguous(change) => {
            let found = match (&change.previous, &change.current) {
                (Some(previous), None) => format!("previous version {}", previous),
                (None, Some(current)) => format!("new version {}", current),
                _ => unreachable!("ambiguous detection has exactly one side"),
            };
            // Operator warning goes to stderr so --json stdout stays pure JSON.
            eprintln!(
                "Warning: possible version change detected (found {}, but not the other side).",
                found
            );
            eprintln!("Please tag the commit manually if the version has changed.");
        }
        Detection::Confirmed { previous, current } => {
            if !args.json {
                println!("Detected version change from {} to {}", previous, current);
                println!("Tagging branch with version {}", current);
            }

            let message = format!("Release {}", current);
            git.run_printed(&["tag", "-a", current, "-m", &message])?;
            tagged = true;

            if !args.json {
                println!("To make the new version available, run:");
                println!("  git push {}", remote);
                println!("  git push {} {}", remote, current);
            }
        }
    }

    if args.json {
        let report = report(&detection, manifest, &current, &previous, tagged);
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            RelcutError::UserError(format!("failed to serialize detection result: {}", e))
        })?;
        println!("{}", json);
    }

    Ok(())
}

fn report<'a>(
    detection: &'a Detection,
    manifest: &'a str,
    current_commit: &'a str,
    previous_commit: &'a str,
    tagged: bool,
) -> DetectionReport<'a> {
    let (outcome, previous_version, current_version) = match detection {
        Detection::NoChange => ("no_change", None, None),
        Detection::Unrelated => ("unrelated", None, None),
        Detection::Ambiguous(change) => (
            "ambiguous",
            change.previous.as_deref(),
            change.current.as_deref(),
        ),
        Detection::Confirmed { previous, current } => {
            ("confirmed", Some(previous.as_str()), Some(current.as_str()))
        }
    };

    DetectionReport {
        manifest,
        current_commit,
        previous_commit,
        outcome,
        previous_version,
        current_version,
        tagged,
    }
}
