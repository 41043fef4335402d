//! InMemoryReadModelStore - HashMap-backed read model store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{
    storage_key, ReadModel, ReadModelError, ReadModelStore, Versioned, WriteBatch, WriteOp,
};

/// Internal stored representation of a read model.
struct StoredModel {
    bytes: Vec<u8>,
    version: u64,
}

type Storage = HashMap<String, StoredModel>;

/// In-memory read model store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryReadModelStore {
    storage: Arc<RwLock<Storage>>,
}

impl Default for InMemoryReadModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryReadModelStore {
    /// Create a new empty read model store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored documents across all collections.
    pub fn len(&self) -> usize {
        self.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Storage>, ReadModelError> {
        self.storage
            .read()
            .map_err(|_| ReadModelError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Storage>, ReadModelError> {
        self.storage
            .write()
            .map_err(|_| ReadModelError::Storage("lock poisoned".into()))
    }

    fn put(storage: &mut Storage, key: String, bytes: Vec<u8>) -> u64 {
        let new_version = storage.get(&key).map(|s| s.version + 1).unwrap_or(1);
        storage.insert(
            key,
            StoredModel {
                bytes,
                version: new_version,
            },
        );
        new_version
    }

    fn scan<'a, M: ReadModel + 'a>(
        storage: &'a Storage,
        predicate: &'a dyn Fn(&M) -> bool,
    ) -> impl Iterator<Item = Versioned<M>> + 'a {
        let prefix = format!("{}:", M::COLLECTION);
        storage
            .iter()
            .filter(move |(key, _)| key.starts_with(&prefix))
            .filter_map(|(_, stored)| {
                serde_json::from_slice::<M>(&stored.bytes)
                    .ok()
                    .map(|data| Versioned {
                        data,
                        version: stored.version,
                    })
            })
            .filter(move |versioned| predicate(&versioned.data))
    }
}

impl ReadModelStore for InMemoryReadModelStore {
    fn get_model<M: ReadModel>(&self, id: &str) -> Result<Option<Versioned<M>>, ReadModelError> {
        let key = storage_key(M::COLLECTION, id);
        let storage = self.read()?;

        match storage.get(&key) {
            Some(stored) => {
                let data: M = serde_json::from_slice(&stored.bytes)?;
                Ok(Some(Versioned {
                    data,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    fn upsert<M: ReadModel>(&self, model: &M) -> Result<Versioned<M>, ReadModelError> {
        let key = storage_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;
        let version = Self::put(&mut storage, key, bytes);

        Ok(Versioned {
            data: model.clone(),
            version,
        })
    }

    fn insert<M: ReadModel>(&self, model: &M) -> Result<Versioned<M>, ReadModelError> {
        let key = storage_key(M::COLLECTION, model.id());
        let bytes = serde_json::to_vec(model)?;

        let mut storage = self.write()?;

        if let Some(existing) = storage.get(&key) {
            return Err(ReadModelError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
                expected: 0,
                actual: existing.version,
            });
        }

        let version = Self::put(&mut storage, key, bytes);

        Ok(Versioned {
            data: model.clone(),
            version,
        })
    }

    fn find_models<M: ReadModel>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ReadModelError> {
        let storage = self.read()?;
        let found: Vec<_> = Self::scan(&storage, predicate).collect();
        Ok(found)
    }

    fn apply(&self, batch: WriteBatch) -> Result<(), ReadModelError> {
        let mut storage = self.write()?;

        // Check every guard before touching anything.
        for op in batch.ops() {
            let current = storage.get(op.key()).map(|s| s.version);
            let expect = op.expect();
            if !expect.holds(current) {
                return Err(ReadModelError::conflict(
                    op.key(),
                    expect.expected_version(),
                    current.unwrap_or(0),
                ));
            }
        }

        for op in batch.into_ops() {
            match op {
                WriteOp::Put { key, bytes, .. } => {
                    Self::put(&mut storage, key, bytes);
                }
                WriteOp::Delete { key, .. } => {
                    storage.remove(&key);
                }
            }
        }

        Ok(())
    }
}
