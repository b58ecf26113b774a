//! Shared utilities for git-file-state integration tests.

pub mod assertions;
pub mod fixtures;
pub mod repository;

use assert_cmd::Command;
use std::path::Path;

/// The CLI with colors off and configuration read from `config_home`
#[allow(dead_code)]
pub fn git_file_state_cmd(config_home: &Path) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("git-file-state")?;
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("RUST_LOG");
    Ok(cmd)
}
