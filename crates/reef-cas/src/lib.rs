//! Content addressing and chunking.
//!
//! This crate provides:
//! - [`identify`]: computes the [`ContentId`](reef_types::ContentId) of a
//!   payload under a given codec (SHA2-256, CIDv1).
//! - [`Chunker`]: splits data into fixed-size leaf chunks, each identified
//!   as a raw block.

mod chunker;
mod error;
mod identify;

pub use chunker::{Chunk, Chunker};
pub use error::CasError;
pub use identify::identify;
