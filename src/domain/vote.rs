use std::fmt;

use serde::{Deserialize, Serialize};

use super::{composite_key, TargetKind};
use crate::ReadModel;

/// Which button was pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteDirection {
    #[serde(rename = "upvote")]
    Up,
    #[serde(rename = "downvote")]
    Down,
}

impl VoteDirection {
    pub fn label(&self) -> &'static str {
        match self {
            VoteDirection::Up => "Upvote",
            VoteDirection::Down => "Downvote",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteDirection::Up => f.write_str("upvote"),
            VoteDirection::Down => f.write_str("downvote"),
        }
    }
}

/// A user's standing vote on one target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VoteState {
    #[default]
    None,
    Up,
    Down,
}

impl VoteState {
    /// The state change caused by pressing `direction` while in this state.
    ///
    /// Pressing the active direction retracts it; pressing the other one
    /// switches sides.
    pub fn apply(self, direction: VoteDirection) -> Transition {
        let (to, upvote_delta, downvote_delta) = match (self, direction) {
            (VoteState::None, VoteDirection::Up) => (VoteState::Up, 1, 0),
            (VoteState::None, VoteDirection::Down) => (VoteState::Down, 0, 1),
            (VoteState::Up, VoteDirection::Up) => (VoteState::None, -1, 0),
            (VoteState::Down, VoteDirection::Down) => (VoteState::None, 0, -1),
            (VoteState::Up, VoteDirection::Down) => (VoteState::Down, -1, 1),
            (VoteState::Down, VoteDirection::Up) => (VoteState::Up, 1, -1),
        };
        Transition {
            from: self,
            to,
            upvote_delta,
            downvote_delta,
        }
    }

    pub fn direction(self) -> Option<VoteDirection> {
        match self {
            VoteState::None => None,
            VoteState::Up => Some(VoteDirection::Up),
            VoteState::Down => Some(VoteDirection::Down),
        }
    }

    pub fn has_upvoted(self) -> bool {
        self == VoteState::Up
    }

    pub fn has_downvoted(self) -> bool {
        self == VoteState::Down
    }
}

impl From<Option<VoteDirection>> for VoteState {
    fn from(direction: Option<VoteDirection>) -> Self {
        match direction {
            None => VoteState::None,
            Some(VoteDirection::Up) => VoteState::Up,
            Some(VoteDirection::Down) => VoteState::Down,
        }
    }
}

/// Result of [`VoteState::apply`]: the next state and the counter deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: VoteState,
    pub to: VoteState,
    pub upvote_delta: i8,
    pub downvote_delta: i8,
}

impl Transition {
    /// True when the press removed the vote that was already cast.
    pub fn is_retraction(&self) -> bool {
        self.to == VoteState::None
    }
}

/// Upvote and downvote counters of a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub upvote_count: u64,
    pub downvote_count: u64,
}

impl Tally {
    /// Counters after `transition`. Never goes below zero.
    pub fn apply(self, transition: &Transition) -> Tally {
        Tally {
            upvote_count: shift(self.upvote_count, transition.upvote_delta),
            downvote_count: shift(self.downvote_count, transition.downvote_delta),
        }
    }
}

fn shift(count: u64, delta: i8) -> u64 {
    if delta < 0 {
        count.saturating_sub(u64::from(delta.unsigned_abs()))
    } else {
        count.saturating_add(u64::from(delta.unsigned_abs()))
    }
}

/// What a vote widget shows: both counters plus the viewer's own vote.
///
/// This is the response body of `vote.create` and the value held by
/// the optimistic [`crate::view::VoteView`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSnapshot {
    pub upvote_count: u64,
    pub downvote_count: u64,
    pub has_upvoted: bool,
    pub has_downvoted: bool,
}

impl VoteSnapshot {
    pub fn new(tally: Tally, state: VoteState) -> Self {
        Self {
            upvote_count: tally.upvote_count,
            downvote_count: tally.downvote_count,
            has_upvoted: state.has_upvoted(),
            has_downvoted: state.has_downvoted(),
        }
    }

    pub fn tally(&self) -> Tally {
        Tally {
            upvote_count: self.upvote_count,
            downvote_count: self.downvote_count,
        }
    }

    pub fn state(&self) -> VoteState {
        if self.has_upvoted {
            VoteState::Up
        } else if self.has_downvoted {
            VoteState::Down
        } else {
            VoteState::None
        }
    }

    /// The snapshot the server is expected to return after `direction` is pressed.
    pub fn predict(&self, direction: VoteDirection) -> VoteSnapshot {
        let transition = self.state().apply(direction);
        VoteSnapshot::new(self.tally().apply(&transition), transition.to)
    }
}

/// The persisted vote of one user on one target.
///
/// Keyed by `"<user>|<kind>|<target>"` with `|` escaped inside ids, which makes a
/// second record for the same pair unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ReadModel)]
#[readmodel(collection = "votes", crate = "crate")]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    #[readmodel(id)]
    pub key: String,
    pub user_id: String,
    pub target_kind: TargetKind,
    pub target_id: String,
    pub direction: VoteDirection,
}

impl VoteRecord {
    pub fn new(
        user_id: impl Into<String>,
        target_kind: TargetKind,
        target_id: impl Into<String>,
        direction: VoteDirection,
    ) -> Self {
        let user_id = user_id.into();
        let target_id = target_id.into();
        Self {
            key: Self::key_for(&user_id, target_kind, &target_id),
            user_id,
            target_kind,
            target_id,
            direction,
        }
    }

    pub fn key_for(user_id: &str, target_kind: TargetKind, target_id: &str) -> String {
        composite_key(&[user_id, target_kind.as_str(), target_id])
    }
}
