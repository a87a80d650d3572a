//! Error types for content addressing operations.

/// Errors that can occur while identifying or chunking content.
#[derive(Debug, thiserror::Error)]
pub enum CasError {
    /// The digest could not be wrapped into a multihash.
    #[error("hash error: {0}")]
    Hash(#[from] multihash::Error),
}
