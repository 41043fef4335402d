//! Optimistic widgets driven end to end through the command service.

use std::future::{ready, Future};
use std::sync::Arc;

use devflow::client::{ApiError, ApiErrorKind, LocalTransport, ToggleClient, Transport};
use devflow::handlers;
use devflow::microsvc::{CommandResponse, Session};
use devflow::view::{NoticeKind, Phase, SaveView, VoteView};
use devflow::{
    InMemoryReadModelStore, Tally, Target, TargetKind, ToggleService, VoteDirection, VoteSnapshot,
    VoteStatus,
};
use serde_json::Value;

type Service = devflow::microsvc::Service<ToggleService<InMemoryReadModelStore>>;

fn service() -> Arc<Service> {
    let toggles = ToggleService::new(InMemoryReadModelStore::new());
    toggles
        .register_target(&Target::with_counts(TargetKind::Question, "q1", 5, 2))
        .unwrap();
    Arc::new(handlers::service(toggles))
}

type Client = ToggleClient<LocalTransport<ToggleService<InMemoryReadModelStore>>>;

fn client(service: &Arc<Service>, user: &str) -> Client {
    ToggleClient::new(LocalTransport::new(Arc::clone(service), Session::for_user(user)))
}

fn counts(up: u64, down: u64) -> Tally {
    Tally {
        upvote_count: up,
        downvote_count: down,
    }
}

/// Transport whose every call fails before reaching a server.
struct Offline;

impl Transport for Offline {
    fn send(
        &self,
        _command: &str,
        _input: Value,
    ) -> impl Future<Output = Result<CommandResponse, ApiError>> + Send {
        ready(Err(ApiError::transport("connection refused")))
    }
}

#[tokio::test]
async fn upvote_is_confirmed_by_server() {
    let service = service();
    let alice = client(&service, "alice");
    let mut view = VoteView::new(TargetKind::Question, "q1", counts(5, 2), true);

    let notice = view.click(&alice, VoteDirection::Up).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.title, "Upvote added successfully");
    assert_eq!(view.phase(), Phase::Confirmed);
    assert_eq!(
        view.snapshot(),
        VoteSnapshot {
            upvote_count: 6,
            downvote_count: 2,
            has_upvoted: true,
            has_downvoted: false,
        }
    );

    let notice = view.click(&alice, VoteDirection::Up).await.unwrap();
    assert_eq!(notice.title, "Upvote removed successfully");
    assert_eq!(view.snapshot().upvote_count, 5);
    assert!(!view.snapshot().has_upvoted);
}

#[tokio::test]
async fn confirmation_reflects_other_voters() {
    let service = service();
    let alice = client(&service, "alice");
    let bob = client(&service, "bob");

    // Alice's page was rendered before Bob voted.
    let mut view = VoteView::new(TargetKind::Question, "q1", counts(5, 2), true);
    let mut bobs = VoteView::new(TargetKind::Question, "q1", counts(5, 2), true);
    bobs.click(&bob, VoteDirection::Down).await.unwrap();

    view.click(&alice, VoteDirection::Down).await.unwrap();
    assert_eq!(view.snapshot().downvote_count, 4);
    assert!(view.snapshot().has_downvoted);
}

#[tokio::test]
async fn hydrated_view_switches_vote() {
    let service = service();
    let alice = client(&service, "alice");

    let mut first = VoteView::new(TargetKind::Question, "q1", counts(5, 2), true);
    first.click(&alice, VoteDirection::Up).await.unwrap();

    // A fresh page load: counters from the target, own vote from vote.status.
    let tally = alice.target(TargetKind::Question, "q1").await.unwrap();
    let mut view = VoteView::new(TargetKind::Question, "q1", tally, true);
    let status = alice.vote_status(TargetKind::Question, "q1").await.unwrap();
    view.hydrate(status);
    assert!(view.snapshot().has_upvoted);

    view.click(&alice, VoteDirection::Down).await.unwrap();
    assert_eq!(
        view.snapshot(),
        VoteSnapshot {
            upvote_count: 5,
            downvote_count: 3,
            has_upvoted: false,
            has_downvoted: true,
        }
    );
}

#[tokio::test]
async fn signed_out_press_sends_nothing() {
    let service = service();
    let alice = client(&service, "alice");
    let mut view = VoteView::new(TargetKind::Question, "q1", counts(5, 2), false);

    let notice = view.click(&alice, VoteDirection::Up).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::LoginRequired);
    assert_eq!(notice.title, "Please login to vote");
    assert_eq!(view.snapshot().upvote_count, 5);
    assert_eq!(view.phase(), Phase::Idle);

    let tally = alice.target(TargetKind::Question, "q1").await.unwrap();
    assert_eq!(tally, counts(5, 2));
}

#[tokio::test]
async fn expired_session_rolls_back_with_login_prompt() {
    let service = service();
    let anonymous = ToggleClient::new(LocalTransport::new(Arc::clone(&service), Session::new()));
    // The page still thinks the user is signed in.
    let mut view = VoteView::new(TargetKind::Question, "q1", counts(5, 2), true);

    let notice = view.click(&anonymous, VoteDirection::Up).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::LoginRequired);
    assert_eq!(view.phase(), Phase::RolledBack);
    assert_eq!(view.snapshot(), VoteSnapshot::new(counts(5, 2), Default::default()));
}

#[tokio::test]
async fn missing_target_rolls_back() {
    let service = service();
    let alice = client(&service, "alice");
    let mut view = VoteView::new(TargetKind::Answer, "gone", counts(1, 0), true);

    let notice = view.click(&alice, VoteDirection::Up).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error { retryable: false });
    assert_eq!(notice.title, "Failed to vote");
    assert_eq!(view.snapshot().upvote_count, 1);
    assert!(!view.snapshot().has_upvoted);
}

#[tokio::test]
async fn offline_press_rolls_back_to_exact_prior_value() {
    let offline = ToggleClient::new(Offline);
    let mut view = VoteView::new(TargetKind::Question, "q1", counts(5, 2), true);
    view.hydrate(VoteStatus {
        has_upvoted: true,
        has_downvoted: false,
    });
    let before = view.snapshot();

    let notice = view.click(&offline, VoteDirection::Down).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error { retryable: true });
    assert_eq!(notice.description.as_deref(), Some("connection refused"));
    assert_eq!(view.snapshot(), before);
    assert_eq!(view.phase(), Phase::RolledBack);

    // A rolled-back widget takes the next press.
    let again = view.click(&offline, VoteDirection::Down).await.unwrap();
    assert!(again.is_error());
    assert_eq!(view.snapshot(), before);
}

#[tokio::test]
async fn offline_reads_report_transport_errors() {
    let offline = ToggleClient::new(Offline);
    let err = offline
        .vote_status(TargetKind::Question, "q1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn save_star_round_trip() {
    let service = service();
    let alice = client(&service, "alice");

    let mut star = SaveView::new("q1", false, true);
    let notice = star.click(&alice).await.unwrap();
    assert_eq!(notice.title, "Question saved successfully");
    assert!(star.is_saved());
    assert_eq!(alice.saved_questions().await.unwrap(), vec!["q1".to_string()]);

    let notice = star.click(&alice).await.unwrap();
    assert_eq!(notice.title, "Question unsaved successfully");
    assert!(!star.is_saved());
    assert!(!alice.save_status("q1").await.unwrap().saved);
}

#[tokio::test]
async fn save_star_blocked_when_signed_out() {
    let service = service();
    let alice = client(&service, "alice");
    let mut star = SaveView::new("q1", false, false);

    let notice = star.click(&alice).await.unwrap();
    assert_eq!(notice.kind, NoticeKind::LoginRequired);
    assert_eq!(notice.title, "You need to be logged in to save a question");
    assert!(!star.is_saved());
    assert!(alice.saved_questions().await.unwrap().is_empty());
}

#[tokio::test]
async fn save_star_rolls_back_when_offline() {
    let offline = ToggleClient::new(Offline);
    let mut star = SaveView::new("q1", true, true);

    let notice = star.click(&offline).await.unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.title, "Error");
    assert!(star.is_saved());
    assert_eq!(star.phase(), Phase::RolledBack);
}
