//! Store wrappers that inject failures and races.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use devflow::{
    InMemoryReadModelStore, ReadModel, ReadModelError, ReadModelStore, Target, ToggleService,
    Versioned, WriteBatch,
};

pub const USER: Option<&str> = Some("user-1");

pub fn service_with(targets: &[Target]) -> ToggleService<InMemoryReadModelStore> {
    let service = ToggleService::new(InMemoryReadModelStore::new());
    for target in targets {
        service.register_target(target).unwrap();
    }
    service
}

/// Delegates to an in-memory store; `apply` can be made to fail, or to lose
/// a race against a simulated concurrent writer a set number of times.
#[derive(Clone)]
pub struct FlakyStore {
    pub inner: InMemoryReadModelStore,
    fail_writes: Arc<AtomicBool>,
    races_left: Arc<AtomicUsize>,
    race_target: Option<Target>,
    pub applies: Arc<AtomicUsize>,
}

impl FlakyStore {
    pub fn new(inner: InMemoryReadModelStore) -> Self {
        Self {
            inner,
            fail_writes: Arc::new(AtomicBool::new(false)),
            races_left: Arc::new(AtomicUsize::new(0)),
            race_target: None,
            applies: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Before each of the next `times` batches, rewrite `target` unchanged
    /// (bumping its version) as if another request had just committed.
    pub fn race_on(mut self, target: Target, times: usize) -> Self {
        self.race_target = Some(target);
        self.races_left.store(times, Ordering::SeqCst);
        self
    }
}

impl ReadModelStore for FlakyStore {
    fn get_model<M: ReadModel>(&self, id: &str) -> Result<Option<Versioned<M>>, ReadModelError> {
        self.inner.get_model(id)
    }

    fn upsert<M: ReadModel>(&self, model: &M) -> Result<Versioned<M>, ReadModelError> {
        self.inner.upsert(model)
    }

    fn insert<M: ReadModel>(&self, model: &M) -> Result<Versioned<M>, ReadModelError> {
        self.inner.insert(model)
    }

    fn find_models<M: ReadModel>(
        &self,
        predicate: &dyn Fn(&M) -> bool,
    ) -> Result<Vec<Versioned<M>>, ReadModelError> {
        self.inner.find_models(predicate)
    }

    fn apply(&self, batch: WriteBatch) -> Result<(), ReadModelError> {
        self.applies.fetch_add(1, Ordering::SeqCst);

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ReadModelError::Storage("connection reset".into()));
        }

        if let Some(target) = &self.race_target {
            let raced = self
                .races_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if raced {
                let current = self.inner.get_model::<Target>(target.id())?;
                if let Some(current) = current {
                    self.inner.upsert(&current.data)?;
                }
            }
        }

        self.inner.apply(batch)
    }
}
