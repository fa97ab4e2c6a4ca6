//! The `cut` command: render, build, commit, tag, push.
//!
//! A strictly sequential pipeline; each step waits for the previous one and
//! any failure aborts the rest of the run. Nothing is retried, since every
//! step past rendering mutates shared history.

use crate::cli::CutArgs;
use crate::context::ReleaseContext;
use crate::error::{RelcutError, Result};
use crate::git::GitRunner;
use crate::manifest;
use std::path::Path;
use std::process::Command;

/// Run the full release pipeline.
pub fn cmd_cut(args: CutArgs) -> Result<()> {
    let ctx = ReleaseContext::resolve(args.folder.as_deref())?;
    let git = ctx.git();

    let version = args.version.unwrap_or_else(manifest::default_version);
    let name = args.name.or_else(|| ctx.config.name.clone());
    let build_command = args.build_command.or_else(|| ctx.config.build_command.clone());

    println!("Rendering {}", ctx.config.manifest);
    manifest::render_manifest(&ctx, &version, name.as_deref())?;

    if let Some(command) = &build_command {
        println!("Running build command");
        run_build_command(&ctx.repo_root, command)?;
    }

    println!("Staging release files");
    for path in &ctx.config.stage {
        git.run(&["add", path])?;
    }

    println!("Committing release");
    git.run(&["commit", "-m", &format!("Release: {}", version)])?;

    println!("Tagging release");
    git.run(&["tag", "-a", &version, "-m", &args.message])?;

    println!("Release {} built successfully.", version);
    if args.no_push {
        println!(
            "The release tag has not been pushed. To push it later, run:\n  git push {} {}",
            ctx.config.remote, version
        );
    } else {
        println!("Pushing {} to {}", version, ctx.config.remote);
        git.run(&["push", &ctx.config.remote, &version])?;
    }

    Ok(())
}

/// Run the configured build command in the repository root.
///
/// The command string is split with shell-words; it is not passed through a
/// shell, so redirections and pipes are not supported.
fn run_build_command(repo_root: &Path, command: &str) -> Result<()> {
    let args = shell_words::split(command).map_err(|e| {
        RelcutError::UserError(format!("invalid build command '{}': {}", command, e))
    })?;

    let Some((program, rest)) = args.split_first() else {
        return Err(RelcutError::UserError(
            "build command is empty".to_string(),
        ));
    };

    let output = Command::new(program)
        .args(rest)
        .current_dir(repo_root)
        .output()
        .map_err(|e| {
            RelcutError::UserError(format!(
                "failed to execute build command '{}': {}",
                command, e
            ))
        })?;

    // Same contract as the git runner: stderr first, then stdout, then the
    // exit status decides.
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        eprintln!("{}", stderr.trim());
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        println!("{}", stdout.trim());
    }

    if output.status.success() {
        Ok(())
    } else {
        Err(RelcutError::CommandFailure {
            command: command.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CutArgs;
    use crate::test_support::{
        add_bare_remote, create_release_repo, git_stdout, write_manifest_template,
    };

    fn cut_args(folder: &Path, version: &str, no_push: bool) -> CutArgs {
        CutArgs {
            folder: Some(folder.to_path_buf()),
            message: format!("Release {}", version),
            version: Some(version.to_string()),
            name: Some("widget".to_string()),
            build_command: None,
            no_push,
        }
    }

    #[test]
    fn cut_renders_commits_and_tags() {
        let temp_dir = create_release_repo();
        write_manifest_template(temp_dir.path());

        cmd_cut(cut_args(temp_dir.path(), "1.2.3", true)).unwrap();

        let manifest = std::fs::read_to_string(temp_dir.path().join("setup.py")).unwrap();
        assert!(manifest.contains("version=\"1.2.3\","));

        let subject = git_stdout(temp_dir.path(), &["log", "-1", "--pretty=%s"]);
        assert_eq!(subject, "Release: 1.2.3");

        let tags = git_stdout(temp_dir.path(), &["tag", "-l"]);
        assert!(tags.lines().any(|t| t == "1.2.3"));

        let tag_object = git_stdout(temp_dir.path(), &["cat-file", "-p", "refs/tags/1.2.3"]);
        assert!(tag_object.contains("Release 1.2.3"));
    }

    #[test]
    fn cut_pushes_tag_to_remote() {
        let temp_dir = create_release_repo();
        write_manifest_template(temp_dir.path());
        let remote_dir = add_bare_remote(temp_dir.path());

        cmd_cut(cut_args(temp_dir.path(), "2.0.0", false)).unwrap();

        let remote_tags = git_stdout(remote_dir.path(), &["tag", "-l"]);
        assert!(remote_tags.lines().any(|t| t == "2.0.0"));
    }

    #[test]
    fn cut_fails_without_template() {
        let temp_dir = create_release_repo();

        let result = cmd_cut(cut_args(temp_dir.path(), "1.0.0", true));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("template"));

        // Nothing was committed or tagged.
        let tags = git_stdout(temp_dir.path(), &["tag", "-l"]);
        assert!(tags.is_empty());
    }

    #[test]
    fn cut_runs_build_command_before_committing() {
        let temp_dir = create_release_repo();
        write_manifest_template(temp_dir.path());

        let mut args = cut_args(temp_dir.path(), "1.0.1", true);
        args.build_command = Some("touch built.marker".to_string());
        cmd_cut(args).unwrap();

        assert!(temp_dir.path().join("built.marker").exists());
        // Staged by the default "." stage path and part of the release commit.
        let files = git_stdout(
            temp_dir.path(),
            &["show", "--name-only", "--pretty=format:", "HEAD"],
        );
        assert!(files.lines().any(|f| f == "built.marker"));
    }

    #[test]
    fn failing_build_command_aborts_the_run() {
        let temp_dir = create_release_repo();
        write_manifest_template(temp_dir.path());

        let mut args = cut_args(temp_dir.path(), "1.0.2", true);
        args.build_command = Some("false".to_string());
        let result = cmd_cut(args);

        assert!(result.is_err());
        match result.unwrap_err() {
            RelcutError::CommandFailure { command } => assert_eq!(command, "false"),
            other => panic!("expected CommandFailure, got {:?}", other),
        }

        let tags = git_stdout(temp_dir.path(), &["tag", "-l"]);
        assert!(tags.is_empty());
    }

    #[test]
    fn run_build_command_rejects_bad_quoting() {
        let temp_dir = create_release_repo();
        let result = run_build_command(temp_dir.path(), "echo \"unterminated");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid build command"));
    }

    #[test]
    fn run_build_command_rejects_empty_command() {
        let temp_dir = create_release_repo();
        let result = run_build_command(temp_dir.path(), "   ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty"));
    }
}
