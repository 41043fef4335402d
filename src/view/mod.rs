//! Optimistic views: show the expected result of a press immediately,
//! then confirm it with the server's answer or roll it back.
//!
//! [`Optimistic`] is the reusable state container; [`VoteView`] and
//! [`SaveView`] wire it to the toggle API. While a request for a widget is
//! in flight, further presses on that widget are ignored.

mod notice;
mod save;
mod vote;

pub use notice::{Notice, NoticeKind};
pub use save::SaveView;
pub use vote::VoteView;

/// Lifecycle of one optimistic update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has been pressed yet.
    Idle,
    /// A prediction is on screen and the request is in flight.
    Pending,
    /// The last request succeeded; the value is the server's.
    Confirmed,
    /// The last request failed; the value before the press was restored.
    RolledBack,
}

/// A locally held value with confirm-or-rollback semantics.
#[derive(Debug, Clone)]
pub struct Optimistic<T> {
    value: T,
    prior: Option<T>,
    phase: Phase,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            prior: None,
            phase: Phase::Idle,
        }
    }

    /// What the widget should render right now.
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Show `predicted` and enter `Pending`. Returns `false` without
    /// changing anything if an update is already pending.
    pub fn begin(&mut self, predicted: T) -> bool {
        if self.is_pending() {
            return false;
        }
        self.prior = Some(std::mem::replace(&mut self.value, predicted));
        self.phase = Phase::Pending;
        true
    }

    /// Replace the prediction with the server's value.
    pub fn confirm(&mut self, authoritative: T) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.value = authoritative;
        self.prior = None;
        self.phase = Phase::Confirmed;
        true
    }

    /// Restore the value held before `begin`.
    pub fn roll_back(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        if let Some(prior) = self.prior.take() {
            self.value = prior;
        }
        self.phase = Phase::RolledBack;
        true
    }

    /// Adopt a freshly read server value. Ignored while pending so a late
    /// read cannot clobber the in-flight prediction.
    pub fn hydrate(&mut self, value: T) -> bool {
        if self.is_pending() {
            return false;
        }
        self.value = value;
        true
    }

    /// Value to restore on rollback, while pending.
    pub fn prior(&self) -> Option<&T> {
        self.prior.as_ref()
    }
}

/// What a press turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<R> {
    /// Send this request, then settle the view with its result.
    Send(R),
    /// A request for this widget is already in flight.
    Ignored,
    /// Nothing to send; show the notice instead.
    Blocked(Notice),
}
