//! Read Models - Versioned document storage for toggle state and counters.
//!
//! Read models provide a simple CRUD abstraction for storing typed data.
//! Every stored document carries a version that increments on each write,
//! and [`ReadModelStore::apply`] commits a batch of guarded writes
//! all-or-nothing. That batch is the only way the toggle service mutates
//! counters and records.
//!
//! ## Example
//!
//! ```ignore
//! use devflow::{ReadModel, InMemoryReadModelStore, ReadModelsExt};
//!
//! #[derive(Serialize, Deserialize, Clone, ReadModel)]
//! #[readmodel(collection = "targets")]
//! struct Target {
//!     #[readmodel(id)]
//!     pub key: String,
//!     pub upvote_count: u64,
//! }
//!
//! let store = InMemoryReadModelStore::new();
//! store.read_models::<Target>().insert(&target)?;
//! let loaded = store.read_models::<Target>().get("question:q1")?;
//! ```

mod batch;
mod in_memory;
mod repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Trait for types that can be stored as read models.
pub trait ReadModel: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this read model type (e.g., "targets", "votes").
    /// Maps to a table in SQL, a collection in MongoDB, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this read model instance.
    fn id(&self) -> &str;
}

/// Storage key for a read model: `"COLLECTION:id"`.
pub fn storage_key(collection: &str, id: &str) -> String {
    format!("{}:{}", collection, id)
}

/// A versioned wrapper around read model data for optimistic concurrency control.
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for read model store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadModelError {
    /// Optimistic concurrency conflict. `expected`/`actual` of 0 mean "absent".
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
    /// Read model not found.
    NotFound { collection: String, id: String },
}

impl ReadModelError {
    /// Build a conflict error from a full storage key.
    pub(crate) fn conflict(key: &str, expected: u64, actual: u64) -> Self {
        let (collection, id) = key.split_once(':').unwrap_or((key, ""));
        ReadModelError::ConcurrencyConflict {
            collection: collection.to_string(),
            id: id.to_string(),
            expected,
            actual,
        }
    }

    /// Whether the error is a lost race that a fresh read could resolve.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ReadModelError::ConcurrencyConflict { .. })
    }
}

impl fmt::Display for ReadModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadModelError::ConcurrencyConflict {
                collection,
                id,
                expected,
                actual,
            } => write!(
                f,
                "concurrency conflict on {}:{} (expected version {}, actual {})",
                collection, id, expected, actual
            ),
            ReadModelError::Serde(msg) => write!(f, "read model serialization error: {}", msg),
            ReadModelError::Storage(msg) => write!(f, "read model storage error: {}", msg),
            ReadModelError::NotFound { collection, id } => {
                write!(f, "read model not found: {}:{}", collection, id)
            }
        }
    }
}

impl std::error::Error for ReadModelError {}

impl From<serde_json::Error> for ReadModelError {
    fn from(err: serde_json::Error) -> Self {
        ReadModelError::Serde(err.to_string())
    }
}

pub use batch::{Expect, WriteBatch, WriteOp};
pub use in_memory::InMemoryReadModelStore;
pub use repository::{ReadModelRepository, ReadModelsExt};
pub use store::ReadModelStore;
