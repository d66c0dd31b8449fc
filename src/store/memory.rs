//! In-memory runtime store.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use super::snapshot::{decode_projection, encode_projection};
use super::{RuntimeProjection, RuntimeStore, StoreError, StoredRuntime};

#[derive(Clone, Debug)]
struct StoredRecord {
    version: u64,
    snapshot: Vec<u8>,
}

/// Mutex-guarded map of card id to encoded record.
///
/// Records are held as binary snapshots, so nothing a caller loads can
/// alias what is stored.
#[derive(Debug, Default)]
pub struct InMemoryRuntimeStore {
    records: Mutex<FxHashMap<String, StoredRecord>>,
}

impl InMemoryRuntimeStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.lock().map_err(|_| StoreError::Poisoned)?.len())
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl RuntimeStore for InMemoryRuntimeStore {
    fn load(&self, card_id: &str) -> Result<Option<StoredRuntime>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        records
            .get(card_id)
            .map(|record| {
                Ok(StoredRuntime {
                    projection: decode_projection(&record.snapshot)?,
                    version: record.version,
                })
            })
            .transpose()
    }

    fn save(
        &self,
        card_id: &str,
        expected_version: Option<u64>,
        projection: &RuntimeProjection,
    ) -> Result<u64, StoreError> {
        let snapshot = encode_projection(projection)?;
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;

        let actual = records.get(card_id).map(|r| r.version);
        if actual != expected_version {
            return Err(StoreError::VersionConflict {
                card_id: card_id.to_string(),
                expected: expected_version,
                actual,
            });
        }

        let version = actual.map_or(1, |v| v + 1);
        records.insert(card_id.to_string(), StoredRecord { version, snapshot });
        Ok(version)
    }

    fn remove(&self, card_id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.remove(card_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BaseStats, CardRuntimeState};

    fn projection(card_id: &str) -> RuntimeProjection {
        RuntimeProjection::initial(CardRuntimeState::initial(card_id, BaseStats::new(1, 2, 3)))
    }

    #[test]
    fn test_save_and_load() {
        let store = InMemoryRuntimeStore::new();
        assert!(store.load("unit").unwrap().is_none());

        let version = store.save("unit", None, &projection("unit")).unwrap();
        assert_eq!(version, 1);

        let loaded = store.load("unit").unwrap().unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.projection, projection("unit"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_versions_advance() {
        let store = InMemoryRuntimeStore::new();
        store.save("unit", None, &projection("unit")).unwrap();
        assert_eq!(store.save("unit", Some(1), &projection("unit")).unwrap(), 2);
        assert_eq!(store.save("unit", Some(2), &projection("unit")).unwrap(), 3);
    }

    #[test]
    fn test_stale_save_rejected() {
        let store = InMemoryRuntimeStore::new();
        store.save("unit", None, &projection("unit")).unwrap();
        store.save("unit", Some(1), &projection("unit")).unwrap();

        let err = store.save("unit", Some(1), &projection("unit")).unwrap_err();
        match err {
            StoreError::VersionConflict { card_id, expected, actual } => {
                assert_eq!(card_id, "unit");
                assert_eq!(expected, Some(1));
                assert_eq!(actual, Some(2));
            }
            other => panic!("Expected version conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_create_twice_rejected() {
        let store = InMemoryRuntimeStore::new();
        store.save("unit", None, &projection("unit")).unwrap();
        assert!(matches!(
            store.save("unit", None, &projection("unit")),
            Err(StoreError::VersionConflict { actual: Some(1), .. })
        ));
    }

    #[test]
    fn test_remove() {
        let store = InMemoryRuntimeStore::new();
        store.save("unit", None, &projection("unit")).unwrap();

        assert!(store.remove("unit").unwrap());
        assert!(!store.remove("unit").unwrap());
        assert!(store.is_empty().unwrap());
    }
}
