use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use git_file_state::core::{
    colors::{format_file_status, status_colored},
    output::{print_detail, print_error, print_section_header},
};
use git_file_state::{
    refresh, Capabilities, Collaborators, FileState, GitRepo, GitStateError, LockState,
    RemoteState, StatusConfig, StatusRecord, StatusSnapshot, StatusTable, StatusUpdate,
    TreeState, RULES,
};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "git-file-state")]
#[command(about = "Resolve and inspect per-file source control status")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a status record given on the command line
    Resolve {
        #[arg(long, default_value = "unknown")]
        file_state: FileState,
        #[arg(long, default_value = "not_in_repo")]
        tree_state: TreeState,
        #[arg(long, default_value = "branched")]
        remote_state: RemoteState,
        #[arg(long, default_value = "unknown")]
        lock_state: LockState,
        /// Who holds the lock, for locked_other
        #[arg(long)]
        lock_owner: Option<String>,
    },
    /// Show the status of files in the current git repository
    Inspect {
        /// Files to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Also list the file history
        #[arg(long)]
        history: bool,
    },
    /// Print the status precedence table
    Rules,
}

#[derive(Serialize)]
struct Report<'a> {
    path: Option<&'a Path>,
    capabilities: Capabilities,
    #[serde(flatten)]
    snapshot: &'a StatusSnapshot,
}

impl<'a> Report<'a> {
    fn new(path: Option<&'a Path>, snapshot: &'a StatusSnapshot) -> Self {
        Self {
            path,
            capabilities: snapshot.capabilities(),
            snapshot,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = StatusConfig::load_or_default();
    if !config.color || cli.json {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Commands::Resolve {
            file_state,
            tree_state,
            remote_state,
            lock_state,
            lock_owner,
        } => execute_resolve(
            StatusRecord::new(file_state, tree_state, remote_state, lock_state),
            lock_owner,
            cli.json,
        ),
        Commands::Inspect { paths, history } => {
            execute_inspect(&config, &paths, history, cli.json)
        }
        Commands::Rules => execute_rules(cli.json),
    };

    if let Err(e) = result {
        match e.downcast_ref::<GitStateError>() {
            Some(GitStateError::NotInGitRepo) => print_error("Not in a git repository"),
            _ => print_error(&format!("{e:#}")),
        }
        std::process::exit(1);
    }
}

fn execute_resolve(
    record: StatusRecord,
    lock_owner: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut update = StatusUpdate::new(record, Utc::now());
    update.lock_owner = lock_owner;
    let snapshot = StatusSnapshot::from_update(update);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&Report::new(None, &snapshot))?
        );
    } else {
        println!("{}", status_colored(snapshot.status(), snapshot.status().as_str()));
        print_capabilities(&snapshot);
    }
    Ok(())
}

fn execute_inspect(
    config: &StatusConfig,
    paths: &[PathBuf],
    with_history: bool,
    json: bool,
) -> anyhow::Result<()> {
    let current_dir = env::current_dir()?;
    let repo = GitRepo::open(&current_dir)?.with_lfs_locking(config.lfs_locking);
    let branch = repo.current_branch()?;
    log::debug!("Current branch: {}", branch.as_deref().unwrap_or("-none-"));

    let collaborators = Collaborators::new(&repo)
        .with_history(&repo)
        .with_branches(&repo);
    let table = StatusTable::new();
    for path in paths {
        let handle = table.track(path);
        refresh(&handle, &collaborators, Utc::now())
            .with_context(|| format!("Failed to read status of {}", path.display()))?;
    }

    let snapshots: Vec<(PathBuf, _)> = table
        .paths()
        .into_iter()
        .filter_map(|path| table.get(&path).map(|handle| (path, handle.snapshot())))
        .collect();

    if json {
        let reports: Vec<Report<'_>> = snapshots
            .iter()
            .map(|(path, snapshot)| Report::new(Some(path.as_path()), snapshot))
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for (path, snapshot) in &snapshots {
        println!(
            "{}",
            format_file_status(snapshot.status(), &path.display().to_string())
        );
        if let Some(owner) = snapshot.checked_out_other() {
            print_detail("locked by", owner);
        }
        if let (Some(current), Some(divergent)) =
            (&branch, snapshot.other_branch_head_modification())
        {
            if snapshot.is_checked_out_or_modified_in_other_branch(current) {
                print_detail(
                    "modified in",
                    &format!("{} ({})", divergent.branch, divergent.commit.short()),
                );
            }
        }
        if let Some(base) = snapshot.base_for_merge() {
            print_detail(
                "merge base",
                &format!("#{} {}", base.revision_number, base.revision.short()),
            );
        }
        if with_history {
            for entry in snapshot.history() {
                print_detail(
                    &format!("#{}", entry.revision_number),
                    &format!("{} {} {}", entry.revision.short(), entry.action, entry.description),
                );
            }
        }
    }
    Ok(())
}

fn execute_rules(json: bool) -> anyhow::Result<()> {
    if json {
        let rules: Vec<_> = RULES
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "rank": rule.rank(),
                    "status": rule.status,
                    "condition": rule.condition,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    for rule in RULES.iter() {
        println!(
            "{:>2}  {}  {}",
            rule.rank(),
            status_colored(rule.status, &format!("{:<15}", rule.status.as_str())),
            rule.condition
        );
    }
    Ok(())
}

fn print_capabilities(snapshot: &StatusSnapshot) {
    let caps = snapshot.capabilities();
    print_section_header("Capabilities");
    let flags = [
        ("can_checkout", caps.can_checkout),
        ("is_checked_out", caps.is_checked_out),
        ("is_checked_out_other", caps.is_checked_out_other),
        ("can_checkin", caps.can_checkin),
        ("can_add", caps.can_add),
        ("can_delete", caps.can_delete),
        ("can_revert", caps.can_revert),
        ("can_edit", caps.can_edit),
        ("is_conflicted", caps.is_conflicted),
        ("is_current", caps.is_current),
        ("is_source_controlled", caps.is_source_controlled),
        ("is_ignored", caps.is_ignored),
        ("is_unknown", caps.is_unknown),
        ("is_modified", caps.is_modified),
        ("is_added", caps.is_added),
        ("is_deleted", caps.is_deleted),
    ];
    for (name, value) in flags {
        print_detail(name, if value { "yes" } else { "no" });
    }
    if let Some(owner) = snapshot.checked_out_other() {
        print_detail("locked by", owner);
    }
}
