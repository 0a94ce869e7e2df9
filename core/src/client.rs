//! Stateless request builder and the unauthenticated half of the API.
//!
//! # Design
//! `ApiClient` holds only an [`Endpoint`] and carries no mutable state between
//! calls. Like every client in this crate, each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The caller executes the actual HTTP round trip.
//!
//! The authenticated notes client wraps an `ApiClient` together with a
//! [`Session`]; it reuses the builders here and only adds the credential.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::notes::NotesClient;
use crate::session::Session;
use crate::types::{TokenRequest, TokenResponse};

const AUTH_PATH: &str = "/auth";

/// Synchronous, stateless client for the unauthenticated endpoints.
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    endpoint: Endpoint,
}

impl ApiClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Client bound to `base_url` with no fallback.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(Endpoint::fixed(base_url))
    }

    pub fn base_url(&self) -> &str {
        self.endpoint.resolve()
    }

    /// Pair this client with a session for the notes endpoints.
    pub fn authenticated(&self, session: Session) -> NotesClient {
        NotesClient::new(self.clone(), session)
    }

    pub fn build_authenticate(
        &self,
        username: &str,
        password: &str,
        usage: &str,
    ) -> Result<HttpRequest, ApiError> {
        let input = TokenRequest {
            usage: usage.to_string(),
        };
        let mut req = self.json_request(HttpMethod::Post, AUTH_PATH, &input)?;
        let credentials = BASE64.encode(format!("{username}:{password}"));
        req.headers
            .push(("authorization".to_string(), format!("Basic {credentials}")));
        Ok(req)
    }

    /// Decode a `POST /auth` reply.
    ///
    /// 403 means bad credentials. Any other status besides 201, or a 201
    /// whose token is empty, is a protocol violation.
    pub fn parse_authenticate(&self, response: HttpResponse) -> Result<TokenResponse, ApiError> {
        match response.status {
            201 => {}
            403 => {
                warn!("authentication rejected");
                return Err(ApiError::InvalidCredentials);
            }
            status => {
                warn!(status, "unexpected authentication status");
                return Err(ApiError::UnexpectedServerResponse {
                    status,
                    body: response.body,
                });
            }
        }
        let token_response: TokenResponse = decode(&response)?;
        if token_response.token.token.is_empty() {
            warn!("authentication succeeded without a token");
            return Err(ApiError::UnexpectedServerResponse {
                status: response.status,
                body: response.body,
            });
        }
        debug!(username = %token_response.user.username, "authenticated");
        Ok(token_response)
    }

    pub(crate) fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let path = format!("{}{path}", self.base_url());
        debug!(method = method.as_str(), %path, "building request");
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
        let mut req = self.request(method, path);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

/// Whether a 404 has its own meaning for the operation being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NotFound {
    Error,
    ServerError,
}

/// Map non-success status codes to the appropriate `ApiError` variant.
///
/// Runs before any decoding so an error payload is never parsed as domain
/// data.
pub(crate) fn check_status(
    response: &HttpResponse,
    expected: u16,
    not_found: NotFound,
) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    warn!(status = response.status, expected, "unexpected response status");
    match response.status {
        403 => Err(ApiError::InvalidCredentials),
        404 if not_found == NotFound::Error => Err(ApiError::NotFound),
        status => Err(ApiError::ServerError {
            status,
            body: response.body.clone(),
        }),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}
