use super::{Dispatch, Notice, Optimistic, Phase};
use crate::client::{ApiError, ToggleClient, Transport, VoteRequest};
use crate::domain::{Tally, TargetKind, VoteDirection, VoteSnapshot, VoteState};
use crate::toggle::VoteStatus;

/// Upvote/downvote widget state for one target.
///
/// The prediction uses the same transition table as the server, so a
/// confirmed response normally matches what is already on screen; the
/// server's snapshot still wins when they differ.
#[derive(Debug, Clone)]
pub struct VoteView {
    target_type: TargetKind,
    target_id: String,
    signed_in: bool,
    state: Optimistic<VoteSnapshot>,
    in_flight: Option<VoteDirection>,
}

impl VoteView {
    pub fn new(
        target_type: TargetKind,
        target_id: impl Into<String>,
        counts: Tally,
        signed_in: bool,
    ) -> Self {
        Self {
            target_type,
            target_id: target_id.into(),
            signed_in,
            state: Optimistic::new(VoteSnapshot::new(counts, VoteState::None)),
            in_flight: None,
        }
    }

    /// Apply the viewer's vote from a `vote.status` read.
    pub fn hydrate(&mut self, status: VoteStatus) -> bool {
        let mut snapshot = *self.state.value();
        snapshot.has_upvoted = status.has_upvoted;
        snapshot.has_downvoted = status.has_downvoted && !status.has_upvoted;
        self.state.hydrate(snapshot)
    }

    pub fn snapshot(&self) -> VoteSnapshot {
        *self.state.value()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Handle a press: predict, and hand back the request to send.
    pub fn begin(&mut self, direction: VoteDirection) -> Dispatch<VoteRequest> {
        if !self.signed_in {
            return Dispatch::Blocked(
                Notice::login_required("Please login to vote")
                    .with_description("Only logged-in users can vote."),
            );
        }

        let predicted = self.state.value().predict(direction);
        if !self.state.begin(predicted) {
            return Dispatch::Ignored;
        }
        self.in_flight = Some(direction);

        Dispatch::Send(VoteRequest {
            target_id: self.target_id.clone(),
            target_type: self.target_type,
            vote_type: direction,
        })
    }

    /// Reconcile with the server's answer. `None` if nothing was in flight.
    pub fn settle(&mut self, result: Result<VoteSnapshot, ApiError>) -> Option<Notice> {
        let direction = self.in_flight.take()?;

        match result {
            Ok(confirmed) => {
                self.state.confirm(confirmed);
                let added = match direction {
                    VoteDirection::Up => confirmed.has_upvoted,
                    VoteDirection::Down => confirmed.has_downvoted,
                };
                let title = format!(
                    "{} {} successfully",
                    direction.label(),
                    if added { "added" } else { "removed" }
                );
                Some(Notice::success(title).with_description("Your vote has been recorded."))
            }
            Err(err) => {
                self.state.roll_back();
                Some(Notice::from_error("Failed to vote", &err))
            }
        }
    }

    /// Press, send through `client`, and settle. `None` if the press was ignored.
    pub async fn click<T: Transport>(
        &mut self,
        client: &ToggleClient<T>,
        direction: VoteDirection,
    ) -> Option<Notice> {
        match self.begin(direction) {
            Dispatch::Send(request) => {
                let result = client.vote(&request).await;
                self.settle(result)
            }
            Dispatch::Ignored => None,
            Dispatch::Blocked(notice) => Some(notice),
        }
    }
}
