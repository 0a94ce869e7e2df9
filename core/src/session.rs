//! Bearer-token credentials for authenticated requests.

use std::fmt;

use crate::http::HttpRequest;
use crate::types::Token;

const AUTHORIZATION: &str = "authorization";

/// An API token obtained from [`crate::ApiClient::parse_authenticate`].
///
/// Immutable once created. `Debug` redacts the token so sessions can be
/// logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Attach `Authorization: Token <value>` to `request`.
    pub fn authorize(&self, request: &mut HttpRequest) {
        request
            .headers
            .push((AUTHORIZATION.to_string(), format!("Token {}", self.token)));
    }
}

impl From<&Token> for Session {
    fn from(token: &Token) -> Self {
        Self::new(token.token.clone())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}
