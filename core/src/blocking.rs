//! Blocking clients that pair the sans-IO builders with a [`Transport`].
//!
//! Each method is one round trip: build, send, interpret the status, decode.
//! Nothing is retried.

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::Transport;
use crate::notes::NotesClient;
use crate::session::Session;
use crate::transport::UreqTransport;
use crate::types::{Note, TokenResponse};

/// Entry point for unauthenticated calls.
#[derive(Debug, Clone)]
pub struct Api<T = UreqTransport> {
    client: ApiClient,
    transport: T,
}

impl Api<UreqTransport> {
    /// Client for `endpoint` using [`UreqTransport`].
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_transport(endpoint, UreqTransport)
    }
}

impl<T: Transport> Api<T> {
    pub fn with_transport(endpoint: Endpoint, transport: T) -> Self {
        Self {
            client: ApiClient::new(endpoint),
            transport,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Exchange a username and password for an API token.
    ///
    /// `usage` is a free-form description of what the token is for.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
        usage: &str,
    ) -> Result<TokenResponse, ApiError> {
        let req = self.client.build_authenticate(username, password, usage)?;
        let response = self.transport.execute(req)?;
        self.client.parse_authenticate(response)
    }

    /// Authenticate, then hand back a client for the notes endpoints.
    pub fn login(
        self,
        username: &str,
        password: &str,
        usage: &str,
    ) -> Result<(AuthenticatedApi<T>, TokenResponse), ApiError> {
        let token_response = self.authenticate(username, password, usage)?;
        let session = Session::from(&token_response.token);
        Ok((self.into_authenticated(session), token_response))
    }

    /// Reuse a token obtained earlier.
    pub fn into_authenticated(self, session: Session) -> AuthenticatedApi<T> {
        AuthenticatedApi {
            client: self.client.authenticated(session),
            transport: self.transport,
        }
    }
}

/// Notes CRUD over a [`Transport`].
#[derive(Debug, Clone)]
pub struct AuthenticatedApi<T = UreqTransport> {
    client: NotesClient,
    transport: T,
}

impl<T: Transport> AuthenticatedApi<T> {
    pub fn client(&self) -> &NotesClient {
        &self.client
    }

    pub fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let response = self.transport.execute(self.client.build_list_notes())?;
        self.client.parse_list_notes(response)
    }

    pub fn get_note(&self, note_id: i64) -> Result<Note, ApiError> {
        let response = self.transport.execute(self.client.build_get_note(note_id))?;
        self.client.parse_get_note(response)
    }

    pub fn create_note(&self, note: &Note) -> Result<Note, ApiError> {
        let req = self.client.build_create_note(note)?;
        let response = self.transport.execute(req)?;
        self.client.parse_create_note(response)
    }

    pub fn update_note(&self, note: &Note) -> Result<Note, ApiError> {
        let req = self.client.build_update_note(note)?;
        let response = self.transport.execute(req)?;
        self.client.parse_update_note(response)
    }

    /// `Ok(true)` once deleted; [`ApiError::NotFound`] if it already was.
    pub fn delete_note(&self, note_id: i64) -> Result<bool, ApiError> {
        let response = self.transport.execute(self.client.build_delete_note(note_id))?;
        self.client.parse_delete_note(response)
    }
}
