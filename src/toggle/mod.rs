//! Toggle Service - decides vote and save transitions from persisted state.
//!
//! Every mutation follows the same shape: read the target and the user's
//! record together with their versions, compute the transition with
//! [`VoteState::apply`], then commit one guarded batch. The client's idea of
//! the prior state is never consulted. A batch that loses a race is
//! discarded whole, and the read/commit pair is repeated against fresh state
//! up to `max_write_attempts` times.

mod error;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commit_builder::CommitBuilderExt;
use crate::config::Config;
use crate::domain::{
    SaveRecord, Tally, Target, TargetKind, VoteDirection, VoteRecord, VoteSnapshot, VoteState,
};
use crate::read_model::{Expect, ReadModelError, ReadModelStore, ReadModelsExt};

pub use error::ToggleError;

/// Default bound on read/commit rounds per request.
pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 3;

/// The viewer's own vote on a target, used to hydrate vote widgets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    pub has_upvoted: bool,
    pub has_downvoted: bool,
}

impl From<VoteState> for VoteStatus {
    fn from(state: VoteState) -> Self {
        Self {
            has_upvoted: state.has_upvoted(),
            has_downvoted: state.has_downvoted(),
        }
    }
}

/// Whether a question is in the viewer's collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveStatus {
    pub saved: bool,
}

/// Vote and save toggles over any [`ReadModelStore`].
pub struct ToggleService<S> {
    store: S,
    max_write_attempts: u32,
}

impl<S: ReadModelStore> ToggleService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_write_attempts: DEFAULT_MAX_WRITE_ATTEMPTS,
        }
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        Self::new(store).with_max_write_attempts(config.max_write_attempts)
    }

    /// Bound the read/commit rounds per request. Values below 1 become 1.
    pub fn with_max_write_attempts(mut self, attempts: u32) -> Self {
        self.max_write_attempts = attempts.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn max_write_attempts(&self) -> u32 {
        self.max_write_attempts
    }

    // =========================================================================
    // Targets
    // =========================================================================

    /// Create a question or answer with its starting counters.
    pub fn register_target(&self, target: &Target) -> Result<(), ToggleError> {
        require_id("targetId", &target.target_id)?;
        match self.store.read_models::<Target>().insert(target) {
            Ok(_) => {
                debug!(target = %target.key, "registered target");
                Ok(())
            }
            Err(e) if e.is_conflict() => Err(ToggleError::Invalid(format!(
                "{} already registered",
                target.key
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Current counters of a target.
    pub fn target(&self, kind: TargetKind, target_id: &str) -> Result<Tally, ToggleError> {
        require_id("targetId", target_id)?;
        self.store
            .read_models::<Target>()
            .get(&Target::key_for(kind, target_id))?
            .map(|t| t.data.tally())
            .ok_or_else(|| not_found(kind, target_id))
    }

    // =========================================================================
    // Votes
    // =========================================================================

    /// Press the upvote or downvote button on a target.
    pub fn apply_vote(
        &self,
        user_id: Option<&str>,
        kind: TargetKind,
        target_id: &str,
        direction: VoteDirection,
    ) -> Result<VoteSnapshot, ToggleError> {
        let user_id = require_user(user_id)?;
        require_id("targetId", target_id)?;

        self.with_retries("vote", || {
            let target = self
                .store
                .read_models::<Target>()
                .get(&Target::key_for(kind, target_id))?
                .ok_or_else(|| not_found(kind, target_id))?;

            let vote_key = VoteRecord::key_for(user_id, kind, target_id);
            let existing = self.store.read_models::<VoteRecord>().get(&vote_key)?;
            let record_guard = Expect::matching(existing.as_ref());

            let current = VoteState::from(existing.as_ref().map(|r| r.data.direction));
            let transition = current.apply(direction);
            let tally = target.data.tally().apply(&transition);

            let batch = self
                .store
                .batch()
                .put(&target.data.with_tally(tally), Expect::Version(target.version));
            let batch = match transition.to.direction() {
                Some(next) => batch.put(
                    &VoteRecord::new(user_id, kind, target_id, next),
                    record_guard,
                ),
                None => batch.delete::<VoteRecord>(&vote_key, record_guard),
            };
            batch.commit()?;

            info!(
                user = user_id,
                target = %target.data.key,
                %direction,
                from = ?transition.from,
                to = ?transition.to,
                upvotes = tally.upvote_count,
                downvotes = tally.downvote_count,
                "vote applied"
            );

            Ok(VoteSnapshot::new(tally, transition.to))
        })
    }

    /// The viewer's current vote on a target.
    pub fn has_voted(
        &self,
        user_id: Option<&str>,
        kind: TargetKind,
        target_id: &str,
    ) -> Result<VoteStatus, ToggleError> {
        let user_id = require_user(user_id)?;
        require_id("targetId", target_id)?;

        let record = self
            .store
            .read_models::<VoteRecord>()
            .get(&VoteRecord::key_for(user_id, kind, target_id))?;

        Ok(VoteState::from(record.map(|r| r.data.direction)).into())
    }

    // =========================================================================
    // Saves
    // =========================================================================

    /// Add the question to the user's collection, or remove it if present.
    pub fn toggle_save(
        &self,
        user_id: Option<&str>,
        question_id: &str,
    ) -> Result<SaveStatus, ToggleError> {
        let user_id = require_user(user_id)?;
        require_id("questionId", question_id)?;

        self.with_retries("save", || {
            let question_key = Target::key_for(TargetKind::Question, question_id);
            if !self.store.read_models::<Target>().exists(&question_key)? {
                return Err(not_found(TargetKind::Question, question_id));
            }

            let save_key = SaveRecord::key_for(user_id, question_id);
            let existing = self.store.read_models::<SaveRecord>().get(&save_key)?;

            let saved = match existing {
                Some(record) => {
                    self.store
                        .batch()
                        .delete::<SaveRecord>(&save_key, Expect::Version(record.version))
                        .commit()?;
                    false
                }
                None => {
                    self.store
                        .batch()
                        .put(&SaveRecord::new(user_id, question_id), Expect::Absent)
                        .commit()?;
                    true
                }
            };

            info!(user = user_id, question = question_id, saved, "save toggled");
            Ok(SaveStatus { saved })
        })
    }

    /// Whether the viewer has saved the question.
    pub fn has_saved(
        &self,
        user_id: Option<&str>,
        question_id: &str,
    ) -> Result<SaveStatus, ToggleError> {
        let user_id = require_user(user_id)?;
        require_id("questionId", question_id)?;

        let saved = self
            .store
            .read_models::<SaveRecord>()
            .exists(&SaveRecord::key_for(user_id, question_id))?;

        Ok(SaveStatus { saved })
    }

    /// Ids of every question in the viewer's collection, sorted.
    pub fn saved_questions(&self, user_id: Option<&str>) -> Result<Vec<String>, ToggleError> {
        let user_id = require_user(user_id)?;

        let mut ids: Vec<String> = self
            .store
            .read_models::<SaveRecord>()
            .find(&|record| record.user_id == user_id)?
            .into_iter()
            .map(|record| record.data.question_id)
            .collect();
        ids.sort();

        Ok(ids)
    }

    /// Run `attempt` until it commits, fails for a reason other than a lost
    /// race, or runs out of rounds.
    fn with_retries<T>(
        &self,
        operation: &'static str,
        mut attempt: impl FnMut() -> Result<T, ToggleError>,
    ) -> Result<T, ToggleError> {
        let mut last_conflict = None;

        for round in 1..=self.max_write_attempts {
            match attempt() {
                Err(ToggleError::Store(e)) if e.is_conflict() => {
                    debug!(operation, round, error = %e, "write lost a race, re-reading");
                    last_conflict = Some(e);
                }
                other => return other,
            }
        }

        warn!(
            operation,
            attempts = self.max_write_attempts,
            "giving up after repeated write conflicts"
        );
        Err(ToggleError::Store(last_conflict.unwrap_or_else(|| {
            ReadModelError::Storage("no write attempts made".into())
        })))
    }
}

fn require_user(user_id: Option<&str>) -> Result<&str, ToggleError> {
    match user_id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ToggleError::Unauthenticated),
    }
}

fn require_id(field: &str, value: &str) -> Result<(), ToggleError> {
    if value.trim().is_empty() {
        return Err(ToggleError::Invalid(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn not_found(kind: TargetKind, id: &str) -> ToggleError {
    ToggleError::NotFound {
        kind,
        id: id.to_string(),
    }
}
