//! Error types for the engine.

/// Errors that abort an archive build.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Content addressing / chunking error.
    #[error("cas error: {0}")]
    Cas(#[from] reef_cas::CasError),

    /// Tree construction error.
    #[error("dag error: {0}")]
    Dag(#[from] reef_dag::DagError),

    /// Container serialization or persistence error.
    #[error("car error: {0}")]
    Car(#[from] reef_car::CarError),

    /// The blocking build task panicked or was cancelled.
    #[error("build task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
