use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Manifest text with the version field spelled the way detection expects:
/// quoted token, trailing comma, end of line.
pub(crate) fn manifest_with_version(version: &str) -> String {
    format!(
        "from setuptools import setup\n\nsetup(\n    name=\"widget\",\n    version=\"{}\",\n)\n",
        version
    )
}

/// Create a git repo with a committed `setup.py` manifest at version 0.9.0.
pub(crate) fn create_release_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Ensure the repo uses a deterministic default branch name across environments.
    // This sets HEAD to an unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    // Configure git user for commits
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);

    std::fs::write(path.join("setup.py"), manifest_with_version("0.9.0")).unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial release scaffolding"]);

    temp_dir
}

/// Rewrite the manifest with a new version and commit the bump.
pub(crate) fn commit_manifest_version(path: &Path, version: &str) {
    std::fs::write(path.join("setup.py"), manifest_with_version(version)).unwrap();
    git(path, &["add", "setup.py"]);
    git(path, &["commit", "-m", &format!("Bump version to {}", version)]);
}

/// Commit a change that does not touch the manifest at all.
pub(crate) fn commit_unrelated_change(path: &Path) {
    std::fs::write(path.join("notes.txt"), "unrelated change\n").unwrap();
    git(path, &["add", "notes.txt"]);
    git(path, &["commit", "-m", "Unrelated change"]);
}

/// Commit a manifest rewrite that deletes the version field entirely.
pub(crate) fn strip_manifest_version(path: &Path) {
    let manifest = "from setuptools import setup\n\nsetup(\n    name=\"widget\",\n)\n";
    std::fs::write(path.join("setup.py"), manifest).unwrap();
    git(path, &["add", "setup.py"]);
    git(path, &["commit", "-m", "Drop version field"]);
}

/// Write a `setup.py.in` template next to the manifest (not committed).
pub(crate) fn write_manifest_template(path: &Path) {
    let template = "from setuptools import setup\n\nsetup(\n    name=\"{name}\",\n    version=\"{version}\",\n)\n";
    std::fs::write(path.join("setup.py.in"), template).unwrap();
}

/// Create a bare repository and register it as `origin`.
pub(crate) fn add_bare_remote(path: &Path) -> TempDir {
    let remote_dir = TempDir::new().unwrap();
    git(remote_dir.path(), &["init", "--bare"]);

    let remote_str = remote_dir.path().to_string_lossy().to_string();
    git(path, &["remote", "add", "origin", &remote_str]);

    remote_dir
}

/// Run a git command, panicking on failure, and return trimmed stdout.
pub(crate) fn git_stdout(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    git_stdout(repo_dir, args);
}
