use std::future::{ready, Future};
use std::sync::Arc;

use serde_json::Value;

use super::{ApiError, Transport};
use crate::microsvc::{CommandRequest, CommandResponse, Service, Session};

/// Dispatches commands straight into a [`Service`] in the same process,
/// on behalf of one session.
pub struct LocalTransport<R> {
    service: Arc<Service<R>>,
    session: Session,
}

impl<R> LocalTransport<R> {
    pub fn new(service: Arc<Service<R>>, session: Session) -> Self {
        Self { service, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl<R> Clone for LocalTransport<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            session: self.session.clone(),
        }
    }
}

impl<R: Send + Sync + 'static> Transport for LocalTransport<R> {
    fn send(
        &self,
        command: &str,
        input: Value,
    ) -> impl Future<Output = Result<CommandResponse, ApiError>> + Send {
        let request = CommandRequest {
            command: command.to_string(),
            input,
            session_variables: self.session.variables().clone(),
        };
        ready(Ok(self.service.dispatch_request(&request)))
    }
}
