//! Error types for container serialization.

/// Errors that can occur while writing a container.
#[derive(Debug, thiserror::Error)]
pub enum CarError {
    /// The structured-record encoder rejected a header or index.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Persisting a finished container failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
