//! Content identifier computation.

use multihash::Multihash;
use reef_types::{Codec, ContentId, SHA2_256};
use sha2::{Digest, Sha256};

use crate::error::CasError;

/// Compute the CIDv1 of `payload` under `codec`.
///
/// The digest is `sha256(payload)` over the exact bytes given, with no
/// envelope. Identical payloads always produce identical IDs for the same
/// codec; the same payload under two codecs produces two distinct IDs.
pub fn identify(payload: &[u8], codec: Codec) -> Result<ContentId, CasError> {
    let digest = Sha256::digest(payload);
    let hash = Multihash::<64>::wrap(SHA2_256, &digest)?;
    Ok(ContentId::new(codec, hash))
}
