//! ReadModelStore - Abstract storage for read models.

use super::{ReadModel, ReadModelError, Versioned, WriteBatch};

/// Versioned document storage for read models.
///
/// Toggle state only changes through [`ReadModelStore::apply`], whose
/// guards keep counters and records consistent. `insert` registers new
/// documents; `upsert` is unguarded and meant for seeding and repair.
///
/// Reads use a `_model` suffix; the `ReadModelRepository` wrapper provides
/// short names.
pub trait ReadModelStore: Send + Sync {
    /// Get a read model by ID. Returns None if not found.
    fn get_model<M: ReadModel>(&self, id: &str) -> Result<Option<Versioned<M>>, ReadModelError>;

    /// Write `model` without a version check. Bypasses every guard, so
    /// use it only to seed or repair data outside of toggle operations.
    fn upsert<M: ReadModel>(&self, model: &M) -> Result<Versioned<M>, ReadModelError>;

    /// Insert a new read model. Fails if it already exists.
    fn insert<M: ReadModel>(&self, model: &M) -> Result<Versioned<M>, ReadModelError>;

    /// Find read models matching a predicate.
    fn find_models<M: ReadModel>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ReadModelError>;

    /// Apply a batch of guarded writes atomically.
    ///
    /// Either every guard holds and every operation is applied, or the
    /// first failing guard is reported as `ConcurrencyConflict` and the
    /// store is left untouched.
    fn apply(&self, batch: WriteBatch) -> Result<(), ReadModelError>;
}
