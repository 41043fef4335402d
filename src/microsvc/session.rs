//! Session variables from the request context.

use std::collections::HashMap;

/// Header carrying the authenticated user id. Set by the auth layer in
/// front of this service; absent for anonymous visitors.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Parsed session variables from the incoming request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an empty (anonymous) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for a signed-in user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(USER_ID_HEADER, user_id);
        session
    }

    /// Create a session from a map of variables. Keys are lowercased.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self {
            variables: variables
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
        }
    }

    /// The signed-in user, if any. Blank values count as anonymous.
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_HEADER).filter(|id| !id.trim().is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables
            .insert(key.into().to_ascii_lowercase(), value.into());
    }

    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }
}
