//! Platform error types.
//!
//! Every failure crossing the platform seam is a [`PlatformError`].  Each
//! variant carries enough context for callers to act on the failure without
//! parsing opaque strings.

/// Unified error type for platform bindings and plugin hosting.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// An operation requiring a live connection was attempted before the
    /// platform reported ready.
    #[error("platform is not ready")]
    NotReady,

    /// The platform binding has no credentials configured.
    #[error("authentication required for platform `{platform}`")]
    AuthRequired { platform: String },

    /// A destination id could not be resolved to a handle.
    #[error("destination not found: `{id}`")]
    DestinationNotFound { id: String },

    /// The remote API rejected a request.
    #[error("api error (status {status}): {reason}")]
    Api { status: u16, reason: String },

    /// A network-level failure while talking to the remote API.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The requested plugin function does not exist.
    #[error("function not found: `{name}`")]
    FunctionNotFound { name: String },

    /// The parameters supplied to a plugin function are invalid.
    #[error("invalid parameters for `{name}`: {reason}")]
    InvalidParams { name: String, reason: String },

    /// A plugin function ran and failed.
    #[error("execution failed for `{name}`: {reason}")]
    ExecutionFailed { name: String, reason: String },
}

/// Convenience alias used throughout the platform crate.
pub type Result<T> = std::result::Result<T, PlatformError>;
