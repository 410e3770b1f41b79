//! Git auto-commit for the memo directory
//!
//! Optional: only used when the `git` config flag is on. The memo
//! directory doubles as the repository root; a missing repository is
//! initialised on first commit. Git runs as a subprocess, like the
//! editor, and failures surface as `ExternalTool` errors.

use std::path::Path;
use std::process::Command;

use super::error::{Error, Result};
use super::fsprobe;

/// Stage one path and commit it with `message`.
///
/// Works for deletions too: staging a removed path records the removal.
pub fn commit_file(memo_dir: &Path, file: &Path, message: &str) -> Result<()> {
    if !fsprobe::dir_exists(memo_dir) {
        return Err(Error::MissingDir(memo_dir.to_path_buf()));
    }

    if !repo_exists(memo_dir) {
        run_git(memo_dir, &["init", "--quiet"])?;
    }

    let rel = file.strip_prefix(memo_dir).unwrap_or(file);
    let rel = rel
        .to_str()
        .ok_or_else(|| Error::malformed(format!("non-UTF-8 path: {}", rel.display())))?;

    run_git(memo_dir, &["add", "--", rel])?;
    run_git(memo_dir, &["commit", "--quiet", "-m", message])?;

    tracing::debug!("committed {} to {}", rel, memo_dir.display());
    Ok(())
}

/// Check if the memo directory is already a git repository.
pub fn repo_exists(memo_dir: &Path) -> bool {
    memo_dir.join(".git").exists()
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .map_err(|err| Error::external_tool("git", format!("could not launch: {}", err)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::external_tool(
            "git",
            format!("`git {}` failed: {}", args.join(" "), stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
