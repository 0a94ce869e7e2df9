//! Domain DTOs for the noteof API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Notes are identified by a numeric `note_id`. Fields the server assigns
//! (`note_id`, `created`) are optional so the same type serves as the create
//! payload, and they are left out of the JSON when unset.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::tag::NoteTag;

/// The server sends empty collections as `null`; read those as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One revision of a note's text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteText {
    pub note_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl NoteText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            note_text: text.into(),
            created: None,
        }
    }
}

/// A note as stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<i64>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub starred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<NoteTag>,
    pub current: NoteText,
    /// Prior revisions, excluding `current`. Never sent as an empty array.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub history: Vec<NoteText>,
}

impl Note {
    /// An unsaved note with the given text, ready for
    /// [`crate::NotesClient::build_create_note`].
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            note_id: None,
            archived: false,
            starred: false,
            created: None,
            tags: Vec::new(),
            current: NoteText::new(text),
            history: Vec::new(),
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NoteTag>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// True if any tag has the same canonical form as `tag`.
    pub fn has_tag(&self, tag: &NoteTag) -> bool {
        self.tags.iter().any(|t| t.matches(tag))
    }
}

/// Free-form per-user metadata.
///
/// The server limits keys and values to 255 characters each; keys are ASCII
/// and values UTF-8. Neither limit is checked client-side.
pub type UserMeta = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    #[serde(rename = "email")]
    pub email_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: UserMeta,
}

/// An API token issued by `POST /auth`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Empty when the server left it out; the auth flow rejects that.
    #[serde(default)]
    pub token: String,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl Token {
    /// A token without an expiration never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration.is_some_and(|expiration| expiration <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Request payload for `POST /auth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub usage: String,
}

/// Successful `POST /auth` reply: the user plus the token fields inline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub user: User,
    #[serde(flatten)]
    pub token: Token,
}
