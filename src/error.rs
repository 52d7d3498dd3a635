use thiserror::Error;

/// Unified error type for tag-next-build operations
#[derive(Error, Debug)]
pub enum TagNextError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse tag {tag}")]
    UnparseableTag { tag: String },

    #[error("Version error: {0}")]
    Version(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tag-next-build
pub type Result<T> = std::result::Result<T, TagNextError>;

impl TagNextError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagNextError::Config(msg.into())
    }

    /// Create an unparseable-tag error for the given tag
    pub fn unparseable(tag: impl Into<String>) -> Self {
        TagNextError::UnparseableTag { tag: tag.into() }
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        TagNextError::Version(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        TagNextError::Manifest(msg.into())
    }

    /// Create an external command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        TagNextError::Command(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        TagNextError::Prompt(msg.into())
    }
}
