//! Authenticated request builder and response parser for the notes resource.
//!
//! # Design
//! `NotesClient` is an [`ApiClient`] plus a [`Session`]. Every `build_*`
//! method goes through [`NotesClient::authorized`], so the token is attached
//! in exactly one place. Every `parse_*` method checks the status before it
//! looks at the body.

use tracing::debug;

use crate::client::{check_status, decode, ApiClient, NotFound};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;
use crate::types::Note;

const NOTES_PATH: &str = "/notes";

/// Synchronous, stateless client for the notes CRUD endpoints.
#[derive(Debug, Clone)]
pub struct NotesClient {
    api: ApiClient,
    session: Session,
}

impl NotesClient {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn authorized(&self, mut req: HttpRequest) -> HttpRequest {
        self.session.authorize(&mut req);
        req
    }

    pub fn build_list_notes(&self) -> HttpRequest {
        self.authorized(self.api.request(HttpMethod::Get, NOTES_PATH))
    }

    pub fn build_get_note(&self, note_id: i64) -> HttpRequest {
        self.authorized(self.api.request(HttpMethod::Get, &note_path(note_id)))
    }

    /// Build `POST /notes`. Any `note_id` on `note` is dropped; the server
    /// assigns one.
    pub fn build_create_note(&self, note: &Note) -> Result<HttpRequest, ApiError> {
        let req = if note.note_id.is_some() {
            let unsaved = Note {
                note_id: None,
                ..note.clone()
            };
            self.api.json_request(HttpMethod::Post, NOTES_PATH, &unsaved)?
        } else {
            self.api.json_request(HttpMethod::Post, NOTES_PATH, note)?
        };
        Ok(self.authorized(req))
    }

    pub fn build_update_note(&self, note: &Note) -> Result<HttpRequest, ApiError> {
        let note_id = note.note_id.ok_or(ApiError::MissingNoteId)?;
        let req = self
            .api
            .json_request(HttpMethod::Put, &note_path(note_id), note)?;
        Ok(self.authorized(req))
    }

    pub fn build_delete_note(&self, note_id: i64) -> HttpRequest {
        self.authorized(self.api.request(HttpMethod::Delete, &note_path(note_id)))
    }

    pub fn parse_list_notes(&self, response: HttpResponse) -> Result<Vec<Note>, ApiError> {
        check_status(&response, 200, NotFound::ServerError)?;
        let notes: Vec<Note> = decode(&response)?;
        debug!(count = notes.len(), "listed notes");
        Ok(notes)
    }

    pub fn parse_get_note(&self, response: HttpResponse) -> Result<Note, ApiError> {
        check_status(&response, 200, NotFound::Error)?;
        decode(&response)
    }

    pub fn parse_create_note(&self, response: HttpResponse) -> Result<Note, ApiError> {
        check_status(&response, 201, NotFound::ServerError)?;
        decode(&response)
    }

    pub fn parse_update_note(&self, response: HttpResponse) -> Result<Note, ApiError> {
        check_status(&response, 200, NotFound::ServerError)?;
        decode(&response)
    }

    /// `Ok(true)` on 204. A 404 means the note was already gone and comes back
    /// as [`ApiError::NotFound`].
    pub fn parse_delete_note(&self, response: HttpResponse) -> Result<bool, ApiError> {
        check_status(&response, 204, NotFound::Error)?;
        Ok(true)
    }
}

fn note_path(note_id: i64) -> String {
    format!("{NOTES_PATH}/{note_id}")
}
