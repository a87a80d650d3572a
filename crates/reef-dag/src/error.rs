//! Error types for tree construction.

/// Errors that can occur while building the tree.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// Identifying a leaf or stem node failed.
    #[error("cas error: {0}")]
    Cas(#[from] reef_cas::CasError),

    /// The node encoder could not serialize a stem node.
    #[error("node encoding error: {0}")]
    Encode(#[from] prost::EncodeError),

    /// A stem node could not be decoded.
    #[error("node decoding error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A decoded link did not carry a valid content identifier.
    #[error("invalid link: {0}")]
    InvalidLink(String),

    /// A stem node was requested with no children or too many.
    #[error("stem node must link 1..={max} children, got {got}")]
    LinkCount {
        /// Number of children requested.
        got: usize,
        /// Maximum fan-out.
        max: usize,
    },

    /// The tree was asked to root zero leaves.
    #[error("no leaf chunks to build from")]
    NoLeaves,
}
