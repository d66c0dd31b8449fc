//! Runtime record storage.
//!
//! The engine hands back a full replacement state on every call, so the
//! store is where lost updates are prevented. Every save carries the version
//! the caller loaded; a save against a version that has since moved on is
//! rejected with [`StoreError::VersionConflict`] instead of silently
//! overwriting the other writer's modifiers and badges.

mod memory;
mod snapshot;

pub use memory::InMemoryRuntimeStore;
pub use snapshot::{decode_projection, encode_projection};

use serde::{Deserialize, Serialize};

use crate::core::CardRuntimeState;
use crate::engine::SimulationResult;

/// The persisted runtime record of one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeProjection {
    pub state: CardRuntimeState,
    /// Trigger-fire log of the call that produced `state`.
    pub applied_effects: Vec<String>,
}

impl RuntimeProjection {
    /// A fresh record with no applied effects.
    pub fn initial(state: CardRuntimeState) -> Self {
        Self {
            state,
            applied_effects: Vec::new(),
        }
    }
}

impl From<SimulationResult> for RuntimeProjection {
    fn from(result: SimulationResult) -> Self {
        Self {
            state: result.next,
            applied_effects: result.applied_effects,
        }
    }
}

/// A loaded record together with the version it was stored at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredRuntime {
    pub projection: RuntimeProjection,
    pub version: u64,
}

/// Errors from runtime stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("version conflict for card '{card_id}': expected {expected:?}, found {actual:?}")]
    VersionConflict {
        card_id: String,
        expected: Option<u64>,
        actual: Option<u64>,
    },

    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Storage for card runtime records.
///
/// Implementations own their synchronization; every method takes `&self`
/// and may be called from many threads.
pub trait RuntimeStore: Send + Sync {
    /// Load a card's record, or `None` if it has none yet.
    fn load(&self, card_id: &str) -> Result<Option<StoredRuntime>, StoreError>;

    /// Save a card's record if its current version is `expected_version`
    /// (`None`: the record must not exist yet). Returns the new version.
    fn save(
        &self,
        card_id: &str,
        expected_version: Option<u64>,
        projection: &RuntimeProjection,
    ) -> Result<u64, StoreError>;

    /// Remove a card's record. Returns whether one existed.
    fn remove(&self, card_id: &str) -> Result<bool, StoreError>;
}
