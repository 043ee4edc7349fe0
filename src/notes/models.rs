//! Note data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note as held by the remote store
///
/// When `is_private` is true, `content` holds an opaque ciphertext
/// envelope; otherwise plaintext. The flag is set at creation and never
/// changes for the life of the note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_private: bool,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl Note {
    pub fn new(title: String, content: String, is_private: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            is_private,
            created: now,
            last_modified: now,
        }
    }
}

/// Why a private note could not be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecryptError {
    /// No local key is present; the user can generate one in Settings
    MissingKey,
    /// The envelope does not authenticate under the current key
    DecryptFailed,
}

/// A note prepared for display
///
/// Private notes arrive decrypted. When decryption was impossible the
/// content is empty (never partial or garbled plaintext) and
/// `decrypt_error` says which kind of failure it was.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    #[serde(flatten)]
    pub note: Note,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decrypt_error: Option<DecryptError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note::new("title".into(), "body".into(), true);
        let json = serde_json::to_string(&note).unwrap();

        assert!(json.contains("\"isPrivate\":true"));
        assert!(json.contains("\"lastModified\""));
    }

    #[test]
    fn test_view_error_wire_names() {
        let view = NoteView {
            note: Note::new("t".into(), String::new(), true),
            decrypt_error: Some(DecryptError::MissingKey),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"decryptError\":\"MISSING_KEY\""));

        let view = NoteView {
            decrypt_error: Some(DecryptError::DecryptFailed),
            ..view
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"decryptError\":\"DECRYPT_FAILED\""));
    }

    #[test]
    fn test_view_without_error_omits_field() {
        let view = NoteView {
            note: Note::new("t".into(), "plain".into(), false),
            decrypt_error: None,
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("decryptError"));
    }
}
