use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop an organize run
#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("invalid target \"{}\": {reason}", path.display())]
    InvalidTarget { path: PathBuf, reason: String },

    #[error("could not read directory \"{}\": {source}", path.display())]
    ListingFailure {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("could not create directory \"{}\": {source}", path.display())]
    DirectoryCreationFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not move \"{}\" to \"{}\": {source}", from.display(), to.display())]
    MoveFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OrganizeError {
    /// Errors that end the run whatever the failure policy says.
    #[must_use]
    pub fn is_fatal_for_run(&self) -> bool {
        matches!(self, Self::InvalidTarget { .. } | Self::ListingFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_target_message_names_path() {
        let err = OrganizeError::InvalidTarget {
            path: PathBuf::from("/no/such/dir"),
            reason: "No such file or directory".to_string(),
        };
        assert!(err.to_string().contains("/no/such/dir"));
        assert!(err.is_fatal_for_run());
    }

    #[test]
    fn test_move_failure_is_per_entry() {
        let err = OrganizeError::MoveFailure {
            from: PathBuf::from("a/x.txt"),
            to: PathBuf::from("a/2024-06/x.txt"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let msg = err.to_string();
        assert!(msg.contains("a/x.txt"));
        assert!(msg.contains("a/2024-06/x.txt"));
        assert!(!err.is_fatal_for_run());
    }
}
