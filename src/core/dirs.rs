use crate::core::error::{GitStateError, Result};
use std::path::PathBuf;

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .ok_or(GitStateError::ConfigDirectoryNotFound)
            })?,
        _ => dirs::config_dir().ok_or(GitStateError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join("git-file-state"))
}
