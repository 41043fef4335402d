use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Tally;
use crate::ReadModel;

/// What kind of content a vote is cast on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Question,
    Answer,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Question => "question",
            TargetKind::Answer => "answer",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "question" => Ok(TargetKind::Question),
            "answer" => Ok(TargetKind::Answer),
            other => Err(format!("unknown target type: {}", other)),
        }
    }
}

/// A question or answer with its vote counters.
///
/// Stored under `"<kind>:<id>"` so a question and an answer may share an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ReadModel)]
#[readmodel(collection = "targets", crate = "crate")]
#[serde(rename_all = "camelCase")]
pub struct Target {
    #[readmodel(id)]
    pub key: String,
    pub kind: TargetKind,
    pub target_id: String,
    pub upvote_count: u64,
    pub downvote_count: u64,
}

impl Target {
    pub fn new(kind: TargetKind, target_id: impl Into<String>) -> Self {
        Self::with_counts(kind, target_id, 0, 0)
    }

    pub fn with_counts(
        kind: TargetKind,
        target_id: impl Into<String>,
        upvote_count: u64,
        downvote_count: u64,
    ) -> Self {
        let target_id = target_id.into();
        Self {
            key: Self::key_for(kind, &target_id),
            kind,
            target_id,
            upvote_count,
            downvote_count,
        }
    }

    pub fn key_for(kind: TargetKind, target_id: &str) -> String {
        format!("{}:{}", kind, target_id)
    }

    pub fn tally(&self) -> Tally {
        Tally {
            upvote_count: self.upvote_count,
            downvote_count: self.downvote_count,
        }
    }

    /// Copy of this target carrying `tally`.
    pub fn with_tally(&self, tally: Tally) -> Self {
        Self {
            upvote_count: tally.upvote_count,
            downvote_count: tally.downvote_count,
            ..self.clone()
        }
    }
}
