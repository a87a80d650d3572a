//! Persisting finished containers.

use std::path::Path;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::CarError;

/// Write a finished container to an async sink and flush it.
pub async fn write_to(mut sink: impl AsyncWrite + Unpin, bytes: &[u8]) -> Result<(), CarError> {
    sink.write_all(bytes).await?;
    sink.flush().await?;
    Ok(())
}

/// Write a finished container to `path`, replacing any existing file.
pub async fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), CarError> {
    let path = path.as_ref();
    let file = tokio::fs::File::create(path).await?;
    write_to(file, bytes).await?;
    debug!(path = %path.display(), len = bytes.len(), "container written");
    Ok(())
}
