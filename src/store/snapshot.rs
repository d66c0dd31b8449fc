//! Binary snapshots of runtime records.

use super::{RuntimeProjection, StoreError};

/// Encode a record as a compact binary snapshot.
pub fn encode_projection(projection: &RuntimeProjection) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serialize(projection)?)
}

/// Decode a snapshot produced by [`encode_projection`].
pub fn decode_projection(bytes: &[u8]) -> Result<RuntimeProjection, StoreError> {
    Ok(bincode::deserialize(bytes)?)
}
