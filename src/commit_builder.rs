//! CommitBuilder - Chain guarded read model writes into one atomic batch.
//!
//! ## Example
//!
//! ```ignore
//! // Retract an upvote: decrement the target and drop the vote record together.
//! store
//!     .batch()
//!     .put(&target, Expect::Version(target_version))
//!     .delete::<VoteRecord>(&vote_key, Expect::Version(vote_version))
//!     .commit()?;
//! ```

use crate::read_model::{
    storage_key, Expect, ReadModel, ReadModelError, ReadModelStore, WriteBatch, WriteOp,
};

/// Builder for chaining multiple guarded writes into a single atomic commit.
pub struct CommitBuilder<'a, S> {
    store: &'a S,
    batch: WriteBatch,
    /// First serialization failure; reported by `commit`.
    error: Option<ReadModelError>,
}

impl<'a, S: ReadModelStore> CommitBuilder<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            batch: WriteBatch::new(),
            error: None,
        }
    }

    /// Queue an insert/replace of `model`, guarded by `expect`.
    pub fn put<M: ReadModel>(mut self, model: &M, expect: Expect) -> Self {
        match serde_json::to_vec(model) {
            Ok(bytes) => self.batch.push(WriteOp::Put {
                key: storage_key(M::COLLECTION, model.id()),
                bytes,
                expect,
            }),
            Err(e) => {
                self.error.get_or_insert(ReadModelError::from(e));
            }
        }
        self
    }

    /// Queue removal of the `M` stored under `id`, guarded by `expect`.
    pub fn delete<M: ReadModel>(mut self, id: &str, expect: Expect) -> Self {
        self.batch.push(WriteOp::Delete {
            key: storage_key(M::COLLECTION, id),
            expect,
        });
        self
    }

    /// Number of queued writes.
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Apply every queued write atomically.
    pub fn commit(self) -> Result<(), ReadModelError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.batch.is_empty() {
            return Ok(());
        }
        self.store.apply(self.batch)
    }
}

/// Extension trait to start a commit builder chain on any store.
pub trait CommitBuilderExt: ReadModelStore + Sized {
    fn batch(&self) -> CommitBuilder<'_, Self> {
        CommitBuilder::new(self)
    }
}

impl<S: ReadModelStore> CommitBuilderExt for S {}
