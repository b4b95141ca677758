use crate::error::OrganizeError;
use crate::scanner;
use crate::types::{DirectoryEntry, FailurePolicy, RunConfiguration, RunSummary};
use chrono::{DateTime, Local, TimeDelta};
use log::{debug, error, info};
use std::fs;
use std::io::{self, ErrorKind};
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;

/// Files modified within this many days are left where they are.
pub const RETENTION_DAYS: i64 = 7;

/// Log target for dry-run previews. The logger always lets it through at info.
pub const PLAN_TARGET: &str = "month_sort::plan";

#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    SkipDirectory,
    SkipRecent,
    /// Move into the archive directory with this name.
    Archive(String),
}

/// Name of the archive directory for a modification time, e.g. `2024-06`.
#[must_use]
pub fn archive_label(modified: &DateTime<Local>) -> String {
    modified.format("%Y-%m").to_string()
}

#[must_use]
pub fn classify(entry: &DirectoryEntry, cutoff: &DateTime<Local>) -> Decision {
    if entry.is_dir {
        return Decision::SkipDirectory;
    }
    // Exactly on the cutoff counts as old enough
    if entry.modified > *cutoff {
        return Decision::SkipRecent;
    }
    Decision::Archive(archive_label(&entry.modified))
}

/// Archives every old-enough file at the top level of `config.target_dir`.
///
/// `now` is the reference instant for the retention window. Under
/// [`FailurePolicy::FailFast`] the first error ends the run and is returned;
/// files moved before it stay moved.
pub fn run(config: &RunConfiguration, now: DateTime<Local>) -> Result<RunSummary, OrganizeError> {
    scanner::validate_target(&config.target_dir)?;
    let entries = scanner::list_entries(&config.target_dir)?;

    let cutoff = now - TimeDelta::days(RETENTION_DAYS);
    let mut summary = RunSummary {
        scanned: entries.len(),
        ..RunSummary::default()
    };

    for entry in &entries {
        match process_entry(config, entry, &cutoff, &mut summary) {
            Ok(()) => {}
            Err(e)
                if config.failure_policy == FailurePolicy::KeepGoing && !e.is_fatal_for_run() =>
            {
                error!("{e}");
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    log_summary(config, &summary);
    Ok(summary)
}

fn process_entry(
    config: &RunConfiguration,
    entry: &DirectoryEntry,
    cutoff: &DateTime<Local>,
    summary: &mut RunSummary,
) -> Result<(), OrganizeError> {
    let name = entry.name.to_string_lossy();

    let label = match classify(entry, cutoff) {
        Decision::SkipDirectory => {
            debug!("\"{name}\" is a directory, skipping");
            summary.skipped_dirs += 1;
            return Ok(());
        }
        Decision::SkipRecent => {
            debug!(
                "\"{name}\" has been modified within the last {RETENTION_DAYS} days, skipping"
            );
            summary.skipped_recent += 1;
            return Ok(());
        }
        Decision::Archive(label) => label,
    };

    let dest_dir = config.target_dir.join(&label);
    let from = config.target_dir.join(&entry.name);
    let to = dest_dir.join(&entry.name);

    if config.dry_run {
        info!(target: PLAN_TARGET, "would move \"{name}\" to \"{}\"", dest_dir.display());
        summary.record_move(entry.size);
        return Ok(());
    }

    if ensure_dir(&dest_dir)? {
        summary.created_dirs += 1;
    }

    debug!("moving \"{name}\" to \"{}\"", dest_dir.display());
    move_file(&from, &to)?;
    summary.record_move(entry.size);
    Ok(())
}

/// Creates `path` unless it is already a directory. Returns whether it was created.
fn ensure_dir(path: &Path) -> Result<bool, OrganizeError> {
    if path.is_dir() {
        return Ok(false);
    }

    match fs::DirBuilder::new().mode(0o777).create(path) {
        Ok(()) => {
            debug!("created \"{}\"", path.display());
            Ok(true)
        }
        // Someone else made it between the check and the create
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(source) => Err(OrganizeError::DirectoryCreationFailure {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn move_file(from: &Path, to: &Path) -> Result<(), OrganizeError> {
    let move_failure = |source| OrganizeError::MoveFailure {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    // rename(2) silently replaces an existing file
    if fs::symlink_metadata(to).is_ok() {
        return Err(move_failure(io::Error::new(
            ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    fs::rename(from, to).map_err(move_failure)
}

fn log_summary(config: &RunConfiguration, summary: &RunSummary) {
    let bytes = human_bytes::human_bytes(summary.moved_bytes as f64);
    if config.dry_run {
        info!(
            target: PLAN_TARGET,
            "dry run: would move {} of {} entries ({bytes})",
            summary.moved,
            summary.scanned
        );
    } else {
        info!(
            "moved {} of {} entries ({bytes}), created {} directories",
            summary.moved,
            summary.scanned,
            summary.created_dirs
        );
    }
    debug!(
        "skipped {} directories and {} recently modified files",
        summary.skipped_dirs, summary.skipped_recent
    );
    if summary.failed > 0 {
        error!("{} entries could not be archived", summary.failed);
    }
}
