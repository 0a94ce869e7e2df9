//! Status mapping of the blocking clients, driven by a canned transport.
//!
//! The stub records every request it is given so tests can also check what
//! went over the wire.

use std::cell::RefCell;

use noteof_core::{
    Api, ApiError, AuthenticatedApi, Endpoint, HttpMethod, HttpRequest, HttpResponse, Note,
    Session, Transport,
};

struct StubTransport {
    status: u16,
    body: String,
    seen: RefCell<Vec<HttpRequest>>,
}

impl StubTransport {
    fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.borrow_mut().push(request);
        Ok(HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: self.body.clone(),
        })
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Err(ApiError::Transport("connection refused".into()))
    }
}

fn notes_api(transport: &StubTransport) -> AuthenticatedApi<&StubTransport> {
    Api::with_transport(Endpoint::fixed("http://notes.test"), transport)
        .into_authenticated(Session::new("tok"))
}

fn saved_note(id: i64) -> Note {
    let mut note = Note::new("text");
    note.note_id = Some(id);
    note
}

#[test]
fn forbidden_fails_every_operation() {
    let transport = StubTransport::new(403, "forbidden");
    let api = notes_api(&transport);

    assert!(matches!(api.list_notes(), Err(ApiError::InvalidCredentials)));
    assert!(matches!(api.get_note(1), Err(ApiError::InvalidCredentials)));
    assert!(matches!(api.create_note(&Note::new("x")), Err(ApiError::InvalidCredentials)));
    assert!(matches!(api.update_note(&saved_note(1)), Err(ApiError::InvalidCredentials)));
    assert!(matches!(api.delete_note(1), Err(ApiError::InvalidCredentials)));

    let seen = transport.seen.borrow();
    assert_eq!(seen.len(), 5);
    for req in seen.iter() {
        assert_eq!(req.header("authorization"), Some("Token tok"));
    }
}

#[test]
fn not_found_on_get_and_delete() {
    let transport = StubTransport::new(404, "");
    let api = notes_api(&transport);

    assert!(matches!(api.get_note(9), Err(ApiError::NotFound)));
    assert!(matches!(api.delete_note(9), Err(ApiError::NotFound)));
}

#[test]
fn create_returns_server_assigned_note() {
    let transport = StubTransport::new(
        201,
        r#"{"note_id":42,"archived":false,"current":{"note_text":"hi","created":"2024-01-01T00:00:00Z"}}"#,
    );
    let api = notes_api(&transport);

    let note = api.create_note(&Note::new("hi")).unwrap();
    assert_eq!(note.note_id, Some(42));
    assert_eq!(note.current.note_text, "hi");

    let seen = transport.seen.borrow();
    assert_eq!(seen[0].method, HttpMethod::Post);
    assert_eq!(seen[0].path, "http://notes.test/notes");
}

#[test]
fn delete_success_is_true() {
    let transport = StubTransport::new(204, "");
    assert!(notes_api(&transport).delete_note(3).unwrap());
}

#[test]
fn update_without_identifier_sends_nothing() {
    let transport = StubTransport::new(200, "{}");
    let err = notes_api(&transport).update_note(&Note::new("x")).unwrap_err();
    assert!(matches!(err, ApiError::MissingNoteId));
    assert!(transport.seen.borrow().is_empty());
}

#[test]
fn authenticate_with_empty_token_is_rejected() {
    let transport = StubTransport::new(
        201,
        r#"{"user":{"username":"ann","email":"ann@example.com","meta":{}},"token":"","created":"2024-01-01T00:00:00Z"}"#,
    );
    let api = Api::with_transport(Endpoint::fixed("http://notes.test"), &transport);

    let err = api.authenticate("ann", "pw", "tests").unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedServerResponse { status: 201, .. }));
}

#[test]
fn authenticate_with_missing_token_is_rejected() {
    let transport = StubTransport::new(
        201,
        r#"{"user":{"username":"ann","email":"ann@example.com"},"created":"2024-01-01T00:00:00Z"}"#,
    );
    let api = Api::with_transport(Endpoint::fixed("http://notes.test"), &transport);

    let err = api.authenticate("ann", "pw", "tests").unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedServerResponse { .. }));
}

#[test]
fn login_attaches_issued_token() {
    let transport = StubTransport::new(
        201,
        r#"{"user":{"username":"ann","email":"ann@example.com","meta":{}},"token":"fresh","created":"2024-01-01T00:00:00Z"}"#,
    );
    let (api, token) = Api::with_transport(Endpoint::fixed("http://notes.test"), &transport)
        .login("ann", "pw", "tests")
        .unwrap();
    assert_eq!(token.token.token, "fresh");
    assert_eq!(api.client().session().token(), "fresh");
}

#[test]
fn transport_errors_propagate() {
    let api = Api::with_transport(Endpoint::default(), FailingTransport)
        .into_authenticated(Session::new("tok"));
    let err = api.list_notes().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.to_string().contains("connection refused"));
}
