use thiserror::Error;

/// Sluice-wide error type for the list store and bundle codec.
///
/// Path-safety violations are always hard failures; parsing problems in
/// user-supplied indexes and bundles degrade to safe defaults where the
/// operation contract allows it and surface as `InvalidArchive` where it
/// does not.
#[derive(Error, Debug)]
pub enum SluiceError {
    /// I/O operations failed (file system access under the store root)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Binary container serialization failed
    #[error("Serialization error: {reason}")]
    Serialization {
        reason: String,
    },

    /// A relative path would resolve outside the store root
    #[error("Path escapes the store root: {path}")]
    PathEscape {
        path: String,
    },

    /// A bundle is unreadable or structurally wrong
    #[error("Invalid bundle: {reason}")]
    InvalidArchive {
        reason: String,
    },

    /// A bundle format the build cannot handle was supplied
    #[error("Unsupported bundle format: {message}")]
    UnsupportedFormat {
        message: String,
    },
}

/// Result type alias for Sluice operations.
pub type Result<T> = std::result::Result<T, SluiceError>;
