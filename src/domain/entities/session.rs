use serde::{Deserialize, Serialize};

/// Bearer token taken from the `authToken` cookie of the current request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Session { token: token.into() }
    }

    /// Empty tokens count as no session.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let token = value.trim();
        (!token.is_empty()).then(|| Session::new(token))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("token", &"[REDACTED]").finish()
    }
}
