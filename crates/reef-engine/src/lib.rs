//! Archive build pipeline tying all reef components together.
//!
//! [`ArchiveBuilder`] runs the whole build for one input buffer:
//! chunk → identify leaves → build the stem-node tree → write the v1
//! container → wrap it as v2. [`build_archive`] does the same with the
//! default [`ArchiveConfig`](reef_types::ArchiveConfig).
//!
//! The library emits `tracing` events but never installs a subscriber; an
//! embedding application calls [`telemetry::init`] (or its own setup) once.

pub mod archive;
pub mod builder;
pub mod config;
pub mod error;
pub mod telemetry;

pub use archive::{Archive, ArchiveStats};
pub use builder::{ArchiveBuilder, build_archive};
pub use config::ReefConfig;
pub use error::EngineError;
