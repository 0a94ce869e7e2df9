//! Note tags and their canonical form.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// A short label attached to a note.
///
/// The server stores tags in canonical form. [`NoteTag::canonical`] applies the
/// same transform locally so tags can be compared before a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteTag(String);

impl NoteTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase, decompose to NFD, then drop Combining Diacritical Marks
    /// (U+0300..=U+036F).
    pub fn canonical(&self) -> String {
        canonicalize(&self.0)
    }

    /// True when both tags have the same canonical form.
    pub fn matches(&self, other: &NoteTag) -> bool {
        self.canonical() == other.canonical()
    }
}

impl From<&str> for NoteTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for NoteTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

pub fn canonicalize(tag: &str) -> String {
    tag.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritical_mark(*c))
        .collect()
}

fn is_combining_diacritical_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}
