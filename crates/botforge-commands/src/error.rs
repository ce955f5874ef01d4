//! Error types for the command registry subsystem.

use std::path::PathBuf;

use botforge_platform::PlatformError;

/// Command-subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Missing or inconsistent construction/runtime configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The discovery root does not exist.
    #[error("command directory not found: `{path}`")]
    DirectoryNotFound { path: PathBuf },

    /// The discovery root exists but could not be read.
    #[error("command directory unreadable: `{path}`: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The discovery tree contains no command manifests at all.
    #[error("nothing to load: no command manifests under `{path}`")]
    EmptyDirectory { path: PathBuf },

    /// Manifests were found but every candidate failed validation.
    #[error("no valid commands under `{path}` ({failures} candidate(s) rejected)")]
    NoValidCommands { path: PathBuf, failures: usize },

    /// A manifest file could not be parsed.
    #[error("invalid manifest `{path}`: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    /// A candidate descriptor violates a platform constraint.
    ///
    /// Always recoverable at the loader level: the candidate is skipped
    /// and recorded, traversal continues.
    #[error("invalid command {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    /// An operation requiring a live remote connection was attempted before
    /// the platform reported ready.
    #[error("platform is not ready")]
    NotReady,

    /// One destination failed during synchronization.
    #[error("sync failed for destination `{id}`: {reason}")]
    Destination { id: String, reason: String },

    /// Aggregate failure over a multi-destination sync.
    #[error("sync failed for {} destination(s): {}", failures.len(), format_failures(failures))]
    SyncFailed { failures: Vec<(String, String)> },

    /// A platform-level failure outside destination isolation.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Filesystem failure while reading a manifest.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_failures(failures: &[(String, String)]) -> String {
    failures
        .iter()
        .map(|(id, reason)| format!("{id}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, CommandError>;
