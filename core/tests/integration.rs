//! Full authenticate + CRUD lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every blocking
//! client operation over real HTTP using `UreqTransport`. Validates that the
//! core's request building and response parsing work end-to-end with the
//! actual server.

use noteof_core::{Api, ApiError, Endpoint, Note, NoteTag, Session, DEFAULT_ENDPOINT};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn api(base_url: &str) -> Api {
    // The override wins over the hosted default.
    Api::new(Endpoint::new(DEFAULT_ENDPOINT, Some(base_url)))
}

#[test]
fn wrong_password_is_invalid_credentials() {
    let base_url = start_server();
    let err = api(&base_url)
        .authenticate(mock_server::USERNAME, "wrong", "integration")
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
}

#[test]
fn unknown_token_is_invalid_credentials() {
    let base_url = start_server();
    let notes = api(&base_url).into_authenticated(Session::new("never-issued"));

    assert!(matches!(notes.list_notes(), Err(ApiError::InvalidCredentials)));
    assert!(matches!(notes.get_note(1), Err(ApiError::InvalidCredentials)));
    assert!(matches!(
        notes.create_note(&Note::new("x")),
        Err(ApiError::InvalidCredentials)
    ));
    let mut existing = Note::new("x");
    existing.note_id = Some(1);
    assert!(matches!(
        notes.update_note(&existing),
        Err(ApiError::InvalidCredentials)
    ));
    assert!(matches!(notes.delete_note(1), Err(ApiError::InvalidCredentials)));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let base_url = format!("http://{addr}");

    let err = api(&base_url)
        .authenticate(mock_server::USERNAME, mock_server::PASSWORD, "integration")
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert_eq!(err.status(), None);

    let notes = api(&base_url).into_authenticated(Session::new("any"));
    assert!(matches!(notes.list_notes(), Err(ApiError::Transport(_))));
}

#[test]
fn crud_lifecycle() {
    let base_url = start_server();

    // Step 1: authenticate.
    let (notes, token) = api(&base_url)
        .login(mock_server::USERNAME, mock_server::PASSWORD, "integration")
        .unwrap();
    assert_eq!(token.user.username, mock_server::USERNAME);
    assert_eq!(token.user.email_address, mock_server::EMAIL);
    assert!(!token.token.token.is_empty());
    assert!(!token.token.is_expired());

    // Step 2: list, should be empty.
    assert!(notes.list_notes().unwrap().is_empty(), "expected empty list");

    // Step 3: create a note.
    let created = notes
        .create_note(&Note::new("Integration test").with_tags(["Café", "work"]))
        .unwrap();
    assert_eq!(created.current.note_text, "Integration test");
    assert!(created.created.is_some());
    assert!(created.has_tag(&NoteTag::from("cafe")));
    let id = created.note_id.unwrap();

    // Step 4: get the created note.
    let fetched = notes.get_note(id).unwrap();
    assert_eq!(fetched, created);

    // Step 5: update the text; the old text lands in history.
    let mut edit = fetched.clone();
    edit.current.note_text = "Updated text".to_string();
    edit.starred = true;
    let updated = notes.update_note(&edit).unwrap();
    assert_eq!(updated.current.note_text, "Updated text");
    assert!(updated.starred);
    assert_eq!(updated.history.len(), 1);
    assert_eq!(updated.history[0].note_text, "Integration test");

    // Step 6: list, should have one item.
    let listed = notes.list_notes().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], updated);

    // Step 7: delete.
    assert!(notes.delete_note(id).unwrap());

    // Step 8: get after delete, should be NotFound.
    assert!(matches!(notes.get_note(id), Err(ApiError::NotFound)));

    // Step 9: delete again, already deleted.
    let err = notes.delete_note(id).unwrap_err();
    assert!(err.is_not_found());

    // Step 10: update after delete is a plain server error.
    assert!(matches!(
        notes.update_note(&updated),
        Err(ApiError::ServerError { status: 404, .. })
    ));

    // Step 11: list, should be empty again.
    assert!(notes.list_notes().unwrap().is_empty(), "expected empty list after delete");
}
