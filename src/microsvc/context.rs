//! Context passed to command handlers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;

/// The context passed to every command handler.
///
/// Generic over `R`, the backend the service was built with.
pub struct Context<'a, R> {
    command_name: String,
    input: Value,
    session: Session,
    backend: &'a R,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(command_name: String, input: Value, session: Session, backend: &'a R) -> Self {
        Self {
            command_name,
            input,
            session,
            backend,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The signed-in user, if any. Toggle operations decide what a missing
    /// user means, so this does not fail.
    pub fn user_id(&self) -> Option<&str> {
        self.session.user_id()
    }

    pub fn backend(&self) -> &R {
        self.backend
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }

    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
