use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

/// The only account the mock server accepts.
pub const USERNAME: &str = "demo";
pub const PASSWORD: &str = "demo-password";
pub const EMAIL: &str = "demo@noteof.invalid";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteText {
    pub note_text: String,
    pub created: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Note {
    pub note_id: i64,
    pub archived: bool,
    pub starred: bool,
    pub created: DateTime<Utc>,
    pub tags: Vec<String>,
    pub current: NoteText,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<NoteText>,
}

#[derive(Deserialize)]
pub struct NoteTextInput {
    pub note_text: String,
}

/// Body of `POST /notes` and `PUT /notes/{id}`. Server-assigned fields the
/// client echoes back are ignored.
#[derive(Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub current: NoteTextInput,
}

#[derive(Deserialize)]
pub struct TokenRequest {
    pub usage: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub meta: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub user: User,
    pub token: String,
    pub created: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

#[derive(Default)]
pub struct Store {
    notes: BTreeMap<i64, Note>,
    next_id: i64,
    tokens: HashSet<String>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/auth", post(authenticate))
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", get(get_note).put(update_note).delete(delete_note))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(BASE64.decode(encoded).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Token ")
}

async fn require_token(db: &Db, headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = bearer_token(headers).ok_or(StatusCode::FORBIDDEN)?;
    if db.read().await.tokens.contains(token) {
        Ok(())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

async fn authenticate(
    State(db): State<Db>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<TokenResponse>), StatusCode> {
    match basic_credentials(&headers) {
        Some((username, password)) if username == USERNAME && password == PASSWORD => {}
        _ => return Err(StatusCode::FORBIDDEN),
    }
    // Credentials are checked before the body so a rejected login is always 403.
    let input: TokenRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "malformed token request");
        StatusCode::BAD_REQUEST
    })?;
    let token = Uuid::new_v4().simple().to_string();
    db.write().await.tokens.insert(token.clone());
    info!(usage = %input.usage, "issued token");
    let response = TokenResponse {
        user: User {
            username: USERNAME.to_string(),
            email: EMAIL.to_string(),
            meta: BTreeMap::new(),
        },
        token,
        created: Utc::now(),
        expiration: None,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_notes(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Note>>, StatusCode> {
    require_token(&db, &headers).await?;
    let store = db.read().await;
    Ok(Json(store.notes.values().cloned().collect()))
}

async fn create_note(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<NoteInput>,
) -> Result<(StatusCode, Json<Note>), StatusCode> {
    require_token(&db, &headers).await?;
    let mut store = db.write().await;
    store.next_id += 1;
    let now = Utc::now();
    let note = Note {
        note_id: store.next_id,
        archived: input.archived,
        starred: input.starred,
        created: now,
        tags: input.tags,
        current: NoteText {
            note_text: input.current.note_text,
            created: now,
        },
        history: Vec::new(),
    };
    store.notes.insert(note.note_id, note.clone());
    debug!(note_id = note.note_id, "created note");
    Ok((StatusCode::CREATED, Json(note)))
}

async fn get_note(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Note>, StatusCode> {
    require_token(&db, &headers).await?;
    let store = db.read().await;
    store.notes.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Replace a note's flags and tags. New text becomes `current` and the old
/// `current` moves to the end of `history`.
async fn update_note(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(input): Json<NoteInput>,
) -> Result<Json<Note>, StatusCode> {
    require_token(&db, &headers).await?;
    let mut store = db.write().await;
    let note = store.notes.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    note.archived = input.archived;
    note.starred = input.starred;
    note.tags = input.tags;
    if input.current.note_text != note.current.note_text {
        let previous = std::mem::replace(
            &mut note.current,
            NoteText {
                note_text: input.current.note_text,
                created: Utc::now(),
            },
        );
        note.history.push(previous);
    }
    Ok(Json(note.clone()))
}

async fn delete_note(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    require_token(&db, &headers).await?;
    let mut store = db.write().await;
    store
        .notes
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
