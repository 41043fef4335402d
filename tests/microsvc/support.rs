//! Shared fixtures: a toggle service with one question and one answer.

use std::collections::HashMap;

use devflow::handlers;
use devflow::microsvc::{CommandRequest, CommandResponse, Service, USER_ID_HEADER};
use devflow::{InMemoryReadModelStore, Target, TargetKind, ToggleService};
use serde_json::Value;

pub type TestService = Service<ToggleService<InMemoryReadModelStore>>;

pub fn test_service() -> TestService {
    let toggles = ToggleService::new(InMemoryReadModelStore::new());
    toggles
        .register_target(&Target::with_counts(TargetKind::Question, "q1", 5, 2))
        .unwrap();
    toggles
        .register_target(&Target::new(TargetKind::Answer, "a1"))
        .unwrap();
    handlers::service(toggles)
}

/// Dispatch `command` as `user` (anonymous when `None`).
pub fn send(service: &TestService, user: Option<&str>, command: &str, input: Value) -> CommandResponse {
    let mut session_variables = HashMap::new();
    if let Some(user) = user {
        session_variables.insert(USER_ID_HEADER.to_string(), user.to_string());
    }
    service.dispatch_request(&CommandRequest {
        command: command.to_string(),
        input,
        session_variables,
    })
}
