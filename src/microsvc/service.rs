//! Service: command handler registry and dispatch for microsvc.
//!
//! ## Example
//!
//! ```ignore
//! use devflow::microsvc::{Service, Session};
//! use serde_json::json;
//!
//! let service = Service::new(toggles)
//!     .command("ping", |_ctx| Ok(json!({ "pong": true })));
//!
//! let result = service.dispatch("ping", json!({}), Session::new());
//! ```

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::context::Context;
use super::error::HandlerError;
use super::response::ActionResponse;
use super::session::Session;

type Guard<R> = Box<dyn Fn(&Context<R>) -> bool + Send + Sync>;
type Handle<R> = Box<dyn Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<R> {
    guard: Option<Guard<R>>,
    handle: Handle<R>,
}

/// Routes named commands to handler functions.
///
/// Generic over `R`, the backend handlers reach through `ctx.backend()`.
pub struct Service<R> {
    backend: R,
    handlers: HashMap<String, CommandHandler<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    pub fn new(backend: R) -> Self {
        Self {
            backend,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler. Returns `self` for chaining.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<R>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(command.to_string(), input, session, &self.backend);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        let result = (handler.handle)(&ctx);
        match &result {
            Ok(_) => debug!(command, user = ?ctx.user_id(), "command handled"),
            Err(e) if e.status_code() >= 500 => {
                warn!(command, user = ?ctx.user_id(), error = %e, "command failed")
            }
            Err(e) => debug!(command, user = ?ctx.user_id(), error = %e, "command rejected"),
        }
        result
    }

    /// Dispatch a `CommandRequest`, returning a status plus the response envelope.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let session = Session::from_map(request.session_variables.clone());
        let result = self.dispatch(&request.command, request.input.clone(), session);
        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.status_code(),
        };
        CommandResponse {
            status,
            body: result.into(),
        }
    }

    /// List registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }
}

// =============================================================================
// Request / Response types
// =============================================================================

/// An inbound command request, independent of transport.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandRequest {
    pub command: String,
    pub input: Value,
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

/// Response from dispatching a command.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CommandResponse {
    /// HTTP-style status code.
    pub status: u16,
    pub body: ActionResponse,
}
