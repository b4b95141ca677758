use crate::error::OrganizeError;
use crate::types::DirectoryEntry;
use chrono::{DateTime, Local};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

pub fn validate_target(path: &Path) -> Result<(), OrganizeError> {
    let metadata = fs::metadata(path).map_err(|e| OrganizeError::InvalidTarget {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !metadata.is_dir() {
        return Err(OrganizeError::InvalidTarget {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(())
}

/// Lists the immediate children of `path`.
///
/// The whole listing is read before anything is returned, so a failure part way
/// through leaves the caller with nothing to process.
pub fn list_entries(path: &Path) -> Result<Vec<DirectoryEntry>, OrganizeError> {
    let listing_failure = |source| OrganizeError::ListingFailure {
        path: path.to_path_buf(),
        source,
    };

    let listing = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(listing_failure)?;

    let mut entries = Vec::with_capacity(listing.len());
    for entry in &listing {
        if let Some(described) = describe(entry).map_err(listing_failure)? {
            entries.push(described);
        }
    }

    Ok(entries)
}

/// Reads the metadata of a listed entry. `None` if it was removed since the listing.
fn describe(entry: &walkdir::DirEntry) -> Result<Option<DirectoryEntry>, walkdir::Error> {
    let metadata = match entry.metadata() {
        Ok(m) => m,
        Err(e) if e.io_error().is_some_and(|io| io.kind() == ErrorKind::NotFound) => {
            debug!("\"{}\" disappeared during the scan, skipping", entry.path().display());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    // UNIX_EPOCH rather than now() so an unreadable mtime never looks recent
    let modified: DateTime<Local> = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into();

    Ok(Some(DirectoryEntry {
        name: entry.file_name().to_os_string(),
        is_dir: entry.file_type().is_dir(),
        modified,
        size: metadata.len(),
    }))
}
