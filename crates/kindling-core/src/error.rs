use std::io;

/// Errors that can occur during a kindling run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed question, action, or resource definition. Not recoverable
    /// by re-prompting; aborts the run.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A resource could not be fetched, or a file or directory could not be
    /// created during the build phase.
    #[error("Resource error: {0}")]
    Resource(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The dependency installer exited unsuccessfully or timed out.
    #[error("Install error: {0}")]
    Install(String),

    /// Best-effort staging removal failed after the run itself succeeded.
    /// When the run also failed, the run error takes precedence and this is
    /// only reported.
    #[error("Cleanup error: {0}")]
    Cleanup(String),
}

/// Result type alias for kindling operations
pub type Result<T> = std::result::Result<T, Error>;
