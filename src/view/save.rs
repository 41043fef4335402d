use super::{Dispatch, Notice, Optimistic, Phase};
use crate::client::{ApiError, ToggleClient, Transport};
use crate::toggle::SaveStatus;

/// Save-to-collection star for one question.
#[derive(Debug, Clone)]
pub struct SaveView {
    question_id: String,
    signed_in: bool,
    state: Optimistic<bool>,
}

impl SaveView {
    pub fn new(question_id: impl Into<String>, saved: bool, signed_in: bool) -> Self {
        Self {
            question_id: question_id.into(),
            signed_in,
            state: Optimistic::new(saved),
        }
    }

    pub fn hydrate(&mut self, status: SaveStatus) -> bool {
        self.state.hydrate(status.saved)
    }

    pub fn is_saved(&self) -> bool {
        *self.state.value()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Handle a press; the request is the question id to toggle.
    pub fn begin(&mut self) -> Dispatch<String> {
        if !self.signed_in {
            return Dispatch::Blocked(Notice::login_required(
                "You need to be logged in to save a question",
            ));
        }

        let flipped = !self.is_saved();
        if !self.state.begin(flipped) {
            return Dispatch::Ignored;
        }
        Dispatch::Send(self.question_id.clone())
    }

    pub fn settle(&mut self, result: Result<SaveStatus, ApiError>) -> Option<Notice> {
        if !self.state.is_pending() {
            return None;
        }

        match result {
            Ok(status) => {
                self.state.confirm(status.saved);
                let verb = if status.saved { "saved" } else { "unsaved" };
                Some(Notice::success(format!("Question {} successfully", verb)))
            }
            Err(err) => {
                self.state.roll_back();
                Some(Notice::from_error("Error", &err))
            }
        }
    }

    /// Press, send through `client`, and settle. `None` if the press was ignored.
    pub async fn click<T: Transport>(&mut self, client: &ToggleClient<T>) -> Option<Notice> {
        match self.begin() {
            Dispatch::Send(question_id) => {
                let result = client.toggle_save(&question_id).await;
                self.settle(result)
            }
            Dispatch::Ignored => None,
            Dispatch::Blocked(notice) => Some(notice),
        }
    }
}
