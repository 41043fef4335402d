//! microsvc: convention-based command handlers for the toggle API.
//!
//! A `Service<R>` maps command names to handler functions. Each handler
//! receives a `Context<R>` with the JSON input, the caller's session, and a
//! reference to the backend `R` (the [`crate::ToggleService`] in production).
//!
//! ## Handler Convention
//!
//! ```ignore
//! // src/handlers/vote_create.rs
//!
//! pub const COMMAND: &str = "vote.create";
//!
//! pub fn guard<R>(ctx: &microsvc::Context<R>) -> bool {
//!     ctx.has_fields(&["targetId", "targetType", "voteType"])
//! }
//!
//! pub fn handle<S: ReadModelStore>(
//!     ctx: &microsvc::Context<ToggleService<S>>,
//! ) -> Result<Value, microsvc::HandlerError> {
//!     let input = ctx.input::<Input>()?;
//!     let snapshot = ctx.backend().apply_vote(ctx.user_id(), /* ... */)?;
//!     Ok(serde_json::to_value(snapshot)?)
//! }
//! ```

mod context;
mod error;
mod response;
mod service;
mod session;

pub use context::Context;
pub use error::HandlerError;
pub use response::{ActionResponse, ErrorBody};
pub use service::{CommandRequest, CommandResponse, Service};
pub use session::{Session, USER_ID_HEADER};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve, serve_with_shutdown};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str`: the command name
/// - `guard(ctx) -> bool`: input validation
/// - `handle(ctx) -> Result<Value, HandlerError>`: the handler
///
/// # Example
/// ```ignore
/// let service = devflow::register_handlers!(
///     microsvc::Service::new(ToggleService::new(InMemoryReadModelStore::new())),
///     handlers::vote_create,
///     handlers::collection_toggle,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
