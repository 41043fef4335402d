//! Command dispatch: payload shapes, envelopes, and status codes.

use serde_json::json;

use crate::support::{send, test_service};

#[test]
fn registers_every_toggle_command() {
    let service = test_service();
    assert_eq!(
        service.commands(),
        vec![
            "collection.list",
            "collection.status",
            "collection.toggle",
            "target.get",
            "vote.create",
            "vote.status",
        ]
    );
}

#[test]
fn vote_create_returns_snapshot() {
    let service = test_service();

    let resp = send(
        &service,
        Some("alice"),
        "vote.create",
        json!({ "targetId": "q1", "targetType": "question", "voteType": "upvote" }),
    );
    assert_eq!(resp.status, 200);
    assert!(resp.body.success);
    assert_eq!(
        resp.body.data,
        Some(json!({
            "upvoteCount": 6,
            "downvoteCount": 2,
            "hasUpvoted": true,
            "hasDownvoted": false,
        }))
    );

    let status = send(
        &service,
        Some("alice"),
        "vote.status",
        json!({ "targetId": "q1", "targetType": "question" }),
    );
    assert_eq!(
        status.body.data,
        Some(json!({ "hasUpvoted": true, "hasDownvoted": false }))
    );

    // Another user sees the shared counters but not alice's vote.
    let other = send(
        &service,
        Some("bob"),
        "vote.status",
        json!({ "targetId": "q1", "targetType": "question" }),
    );
    assert_eq!(
        other.body.data,
        Some(json!({ "hasUpvoted": false, "hasDownvoted": false }))
    );
}

#[test]
fn downvote_on_answer() {
    let service = test_service();

    let resp = send(
        &service,
        Some("alice"),
        "vote.create",
        json!({ "targetId": "a1", "targetType": "answer", "voteType": "downvote" }),
    );
    assert_eq!(resp.status, 200);

    let tally = send(
        &service,
        None,
        "target.get",
        json!({ "targetId": "a1", "targetType": "answer" }),
    );
    assert_eq!(tally.status, 200);
    assert_eq!(
        tally.body.data,
        Some(json!({ "upvoteCount": 0, "downvoteCount": 1 }))
    );
}

#[test]
fn anonymous_vote_is_unauthorized() {
    let service = test_service();

    let resp = send(
        &service,
        None,
        "vote.create",
        json!({ "targetId": "q1", "targetType": "question", "voteType": "upvote" }),
    );
    assert_eq!(resp.status, 401);
    assert!(!resp.body.success);
    assert!(resp.body.data.is_none());
    assert!(resp.body.error_message().contains("log in"));

    let tally = send(
        &service,
        None,
        "target.get",
        json!({ "targetId": "q1", "targetType": "question" }),
    );
    assert_eq!(
        tally.body.data,
        Some(json!({ "upvoteCount": 5, "downvoteCount": 2 }))
    );
}

#[test]
fn blank_user_header_is_anonymous() {
    let service = test_service();
    let resp = send(&service, Some("  "), "collection.toggle", json!({ "questionId": "q1" }));
    assert_eq!(resp.status, 401);
}

#[test]
fn unknown_target_is_not_found() {
    let service = test_service();

    let resp = send(
        &service,
        Some("alice"),
        "vote.create",
        json!({ "targetId": "missing", "targetType": "answer", "voteType": "upvote" }),
    );
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body.error_message(), "not found: answer missing");
}

#[test]
fn malformed_payloads_are_bad_requests() {
    let service = test_service();

    // Missing field: rejected by the guard.
    let missing = send(
        &service,
        Some("alice"),
        "vote.create",
        json!({ "targetId": "q1", "targetType": "question" }),
    );
    assert_eq!(missing.status, 400);

    // Unknown vote type: rejected while decoding.
    let bad_vote = send(
        &service,
        Some("alice"),
        "vote.create",
        json!({ "targetId": "q1", "targetType": "question", "voteType": "sideways" }),
    );
    assert_eq!(bad_vote.status, 400);
    assert!(bad_vote.body.error_message().starts_with("decode failed"));

    let bad_kind = send(
        &service,
        Some("alice"),
        "vote.status",
        json!({ "targetId": "q1", "targetType": "comment" }),
    );
    assert_eq!(bad_kind.status, 400);

    let empty_id = send(&service, Some("alice"), "collection.toggle", json!({ "questionId": "" }));
    assert_eq!(empty_id.status, 400);
}

#[test]
fn unknown_command_is_not_found() {
    let service = test_service();
    let resp = send(&service, Some("alice"), "vote.delete", json!({}));
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body.error_message(), "unknown command: vote.delete");
}

#[test]
fn collection_toggle_round_trip() {
    let service = test_service();

    let saved = send(&service, Some("alice"), "collection.toggle", json!({ "questionId": "q1" }));
    assert_eq!(saved.status, 200);
    assert_eq!(saved.body.data, Some(json!({ "saved": true })));

    let status = send(&service, Some("alice"), "collection.status", json!({ "questionId": "q1" }));
    assert_eq!(status.body.data, Some(json!({ "saved": true })));

    let list = send(&service, Some("alice"), "collection.list", json!({}));
    assert_eq!(list.body.data, Some(json!({ "questions": ["q1"] })));

    let unsaved = send(&service, Some("alice"), "collection.toggle", json!({ "questionId": "q1" }));
    assert_eq!(unsaved.body.data, Some(json!({ "saved": false })));

    let list = send(&service, Some("alice"), "collection.list", json!({}));
    assert_eq!(list.body.data, Some(json!({ "questions": [] })));
}

#[test]
fn answers_cannot_be_saved() {
    let service = test_service();
    let resp = send(&service, Some("alice"), "collection.toggle", json!({ "questionId": "a1" }));
    assert_eq!(resp.status, 404);
}

#[test]
fn anonymous_status_reads_are_unauthorized() {
    let service = test_service();

    let vote = send(
        &service,
        None,
        "vote.status",
        json!({ "targetId": "q1", "targetType": "question" }),
    );
    assert_eq!(vote.status, 401);

    let save = send(&service, None, "collection.status", json!({ "questionId": "q1" }));
    assert_eq!(save.status, 401);

    let list = send(&service, None, "collection.list", json!({}));
    assert_eq!(list.status, 401);
}
