//! ReadModelRepository - Typed view over one collection of a store.

use std::marker::PhantomData;

use super::{ReadModel, ReadModelError, ReadModelStore, Versioned};

/// Typed accessor for the read models of one collection.
///
/// Toggle code reads through this wrapper (`store.read_models::<Target>()`)
/// and writes through [`crate::CommitBuilder`], so every mutation carries a
/// version guard.
pub struct ReadModelRepository<'a, S, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: ReadModelStore, M: ReadModel> ReadModelRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Versioned<M>>, ReadModelError> {
        self.store.get_model(id)
    }

    /// Like `get`, but a missing document is `ReadModelError::NotFound`.
    pub fn require(&self, id: &str) -> Result<Versioned<M>, ReadModelError> {
        self.get(id)?.ok_or_else(|| ReadModelError::NotFound {
            collection: M::COLLECTION.to_string(),
            id: id.to_string(),
        })
    }

    pub fn exists(&self, id: &str) -> Result<bool, ReadModelError> {
        Ok(self.get(id)?.is_some())
    }

    pub fn insert(&self, model: &M) -> Result<Versioned<M>, ReadModelError> {
        self.store.insert(model)
    }

    /// All documents matching `predicate`, in storage order.
    pub fn find(&self, predicate: &dyn Fn(&M) -> bool) -> Result<Vec<Versioned<M>>, ReadModelError> {
        self.store.find_models(predicate)
    }
}

/// Extension trait for typed read model access on any ReadModelStore.
pub trait ReadModelsExt: ReadModelStore + Sized {
    fn read_models<M: ReadModel>(&self) -> ReadModelRepository<'_, Self, M> {
        ReadModelRepository::new(self)
    }
}

impl<S: ReadModelStore> ReadModelsExt for S {}
