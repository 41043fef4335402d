//! WriteBatch - Guarded writes applied all-or-nothing by a store.

use super::Versioned;

/// Precondition on the current version of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// No check.
    Any,
    /// The key must not exist.
    Absent,
    /// The key must exist at exactly this version.
    Version(u64),
}

impl Expect {
    /// The guard matching what was just read: `Version` if present, `Absent` if not.
    pub fn matching<T>(read: Option<&Versioned<T>>) -> Self {
        match read {
            Some(versioned) => Expect::Version(versioned.version),
            None => Expect::Absent,
        }
    }

    /// Check the guard against the current version (`None` = missing key).
    pub fn holds(&self, current: Option<u64>) -> bool {
        match (self, current) {
            (Expect::Any, _) => true,
            (Expect::Absent, None) => true,
            (Expect::Absent, Some(_)) => false,
            (Expect::Version(expected), Some(actual)) => *expected == actual,
            (Expect::Version(_), None) => false,
        }
    }

    /// Version number reported in conflict errors (0 = absent).
    pub(crate) fn expected_version(&self) -> u64 {
        match self {
            Expect::Version(v) => *v,
            Expect::Any | Expect::Absent => 0,
        }
    }
}

/// A single guarded write in a batch.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Insert or replace the document stored under `key`.
    Put {
        key: String,
        bytes: Vec<u8>,
        expect: Expect,
    },
    /// Remove the document stored under `key`.
    Delete { key: String, expect: Expect },
}

impl WriteOp {
    pub fn key(&self) -> &str {
        match self {
            WriteOp::Put { key, .. } | WriteOp::Delete { key, .. } => key,
        }
    }

    pub fn expect(&self) -> Expect {
        match self {
            WriteOp::Put { expect, .. } | WriteOp::Delete { expect, .. } => *expect,
        }
    }
}

/// An ordered list of guarded writes.
///
/// Stores check every guard against the state before the batch, then apply
/// the operations in order. A batch with any failing guard writes nothing.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: WriteOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}
