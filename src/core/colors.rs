//! Color mapping for consolidated statuses in CLI output.
//!
//! # Color Scheme
//! - **Remote divergence**: magenta, the local copy is out of date
//! - **Locked by someone else**: red
//! - **Conflicts**: red bold
//! - **Added / Deleted / Modified**: green / red / yellow
//! - **Checked out**: blue
//! - **Untracked**: cyan
//! - **Everything else**: muted

use crate::core::git_status::ConsolidatedStatus;
use colored::*;

/// Apply the color for `status` to `text`
pub fn status_colored(status: ConsolidatedStatus, text: &str) -> ColoredString {
    use ConsolidatedStatus as S;

    match status {
        S::NotAtHead | S::AddedAtHead | S::DeletedAtHead | S::NotLatest => text.magenta(),
        S::LockedOther => text.red(),
        S::Unmerged => text.red().bold(),
        S::Added => text.green(),
        S::Deleted => text.red(),
        S::Modified => text.yellow(),
        S::CheckedOut => text.blue(),
        S::Untracked => text.cyan(),
        S::Lockable | S::Unmodified => text.white(),
        S::Ignored | S::None => text.bright_black(),
    }
}

/// Status name padded to the widest name, then colored
pub fn aligned_status(status: ConsolidatedStatus) -> ColoredString {
    status_colored(status, &format!("{:<15}", status.as_str()))
}

/// One line of `inspect` output: `<status> <path>`
pub fn format_file_status(status: ConsolidatedStatus, path: &str) -> String {
    format!("{} {}", aligned_status(status), status_colored(status, path))
}
