//! Git repository management and setup utilities
//!
//! Provides functions for creating throwaway repositories in specific states.

#![allow(dead_code)]

use git_file_state::{GitStateError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of a file inside the repository
    pub fn file(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }
}

/// Runs git with `args` in `repo_path`, failing on a non-zero exit
pub fn git(repo_path: &Path, args: &[&str]) -> Result<()> {
    git_with_env(repo_path, args, &[])
}

fn git_with_env(repo_path: &Path, args: &[&str], env: &[(&str, String)]) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .envs(env.iter().map(|(k, v)| (*k, v.as_str())))
        .output()
        .map_err(GitStateError::Io)?;

    if !output.status.success() {
        return Err(GitStateError::Io(std::io::Error::other(format!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        ))));
    }
    Ok(())
}

/// Runs git with `args` in `repo_path`, reporting whether it exited successfully
pub fn try_git(repo_path: &Path, args: &[&str]) -> Result<bool> {
    let status = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .map_err(GitStateError::Io)?
        .status;
    Ok(status.success())
}

/// Sets up a fresh git repository with user config set to avoid prompts
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(GitStateError::Io)?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["config", "commit.gpgsign", "false"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with "initial.txt" committed
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit_at(&repo.path, "Initial commit", 1_600_000_000)?;

    Ok(repo)
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content).map_err(GitStateError::Io)?;
    Ok(())
}

pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename)).map_err(GitStateError::Io)?;
    Ok(())
}

pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])
}

/// Commits with author and committer dates pinned to `epoch` seconds
pub fn git_commit_at(repo_path: &Path, message: &str, epoch: i64) -> Result<()> {
    let date = format!("@{epoch} +0000");
    git_with_env(
        repo_path,
        &["commit", "-m", message],
        &[
            ("GIT_AUTHOR_DATE", date.clone()),
            ("GIT_COMMITTER_DATE", date),
        ],
    )
}

/// Leaves the repository mid-merge with "initial.txt" conflicted: the current branch and
/// "feature" both change it after the initial commit.
pub fn setup_conflicted_merge(repo_path: &Path) -> Result<()> {
    git(repo_path, &["checkout", "--quiet", "-b", "feature"])?;
    create_file(repo_path, "initial.txt", "feature content\n")?;
    git_add(repo_path, "initial.txt")?;
    git_commit_at(repo_path, "Feature change", 1_600_000_100)?;
    git(repo_path, &["checkout", "--quiet", "-"])?;
    create_file(repo_path, "initial.txt", "mainline content\n")?;
    git_add(repo_path, "initial.txt")?;
    git_commit_at(repo_path, "Mainline change", 1_600_000_200)?;

    // The merge is expected to stop on the conflict.
    let merged = try_git(repo_path, &["merge", "--no-edit", "feature"])?;
    assert!(!merged, "merge of feature should conflict");
    Ok(())
}
