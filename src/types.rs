use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::path::PathBuf;

/// A top-level entry of the target directory, as seen at scan time.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: OsString,
    pub is_dir: bool,
    pub modified: DateTime<Local>,
    pub size: u64,
}

/// What to do when a single entry cannot be archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole run on the first error.
    #[default]
    FailFast,
    /// Log the error, count it, and move on to the next entry.
    KeepGoing,
}

#[derive(Debug, Clone)]
pub struct RunConfiguration {
    pub target_dir: PathBuf,
    pub dry_run: bool,
    pub verbose: bool,
    pub failure_policy: FailurePolicy,
}

impl RunConfiguration {
    #[must_use]
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            dry_run: false,
            verbose: false,
            failure_policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub scanned: usize,
    pub skipped_dirs: usize,
    pub skipped_recent: usize,
    /// Files moved, or only planned when running dry.
    pub moved: usize,
    pub moved_bytes: u64,
    pub created_dirs: usize,
    pub failed: usize,
}

impl RunSummary {
    pub(crate) fn record_move(&mut self, size: u64) {
        self.moved += 1;
        self.moved_bytes += size;
    }
}
