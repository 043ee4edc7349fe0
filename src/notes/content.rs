//! Transforms note bodies between their stored and display forms

use std::sync::Arc;

use crate::encryption::{EncryptionError, EncryptionResult, EncryptionService};

use super::models::{DecryptError, Note, NoteView};

/// Boundary between the remote note store and the encryption service
///
/// Private content is sealed before it leaves the client and opened
/// after it comes back. Decryption failures are classified for display;
/// the view never carries partial plaintext.
pub struct NoteContentAdapter {
    service: Arc<EncryptionService>,
}

impl NoteContentAdapter {
    pub fn new(service: Arc<EncryptionService>) -> Self {
        Self { service }
    }

    /// Content to send when creating a note
    ///
    /// Private notes are encrypted first. A `KeyUnavailable` error
    /// propagates so the caller can prompt for key generation instead of
    /// storing plaintext in a note marked private.
    pub fn prepare_content(&self, content: &str, is_private: bool) -> EncryptionResult<String> {
        if is_private {
            self.service.encrypt(content)
        } else {
            Ok(content.to_string())
        }
    }

    /// Content to send when editing an existing note
    ///
    /// Privacy comes from the stored note, not from the caller: a note's
    /// `is_private` flag never changes after creation.
    pub fn prepare_update(&self, existing: &Note, new_content: &str) -> EncryptionResult<String> {
        self.prepare_content(new_content, existing.is_private)
    }

    /// Resolve a fetched note into its display form
    ///
    /// Never fails. A private note that cannot be decrypted comes back
    /// with empty content and a classification the UI messages on:
    /// `MissingKey` when no key is held, `DecryptFailed` otherwise.
    pub fn view(&self, note: Note) -> NoteView {
        if !note.is_private {
            return NoteView {
                note,
                decrypt_error: None,
            };
        }

        match self.service.decrypt(&note.content) {
            Ok(plaintext) => NoteView {
                note: Note {
                    content: plaintext,
                    ..note
                },
                decrypt_error: None,
            },
            Err(EncryptionError::KeyUnavailable) => NoteView {
                note: Note {
                    content: String::new(),
                    ..note
                },
                decrypt_error: Some(DecryptError::MissingKey),
            },
            Err(_) => NoteView {
                note: Note {
                    content: String::new(),
                    ..note
                },
                decrypt_error: Some(DecryptError::DecryptFailed),
            },
        }
    }

    /// Resolve a whole fetch result
    pub fn view_all(&self, notes: Vec<Note>) -> Vec<NoteView> {
        notes.into_iter().map(|n| self.view(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

    use super::*;
    use crate::encryption::MemoryKeyStore;

    fn adapter() -> (Arc<EncryptionService>, NoteContentAdapter) {
        let service = Arc::new(EncryptionService::new(Arc::new(MemoryKeyStore::new())));
        let adapter = NoteContentAdapter::new(service.clone());
        (service, adapter)
    }

    #[test]
    fn test_public_note_passes_through() {
        let (_, adapter) = adapter();

        let stored = adapter.prepare_content("groceries", false).unwrap();
        assert_eq!(stored, "groceries");

        let view = adapter.view(Note::new("list".into(), stored, false));
        assert_eq!(view.note.content, "groceries");
        assert!(view.decrypt_error.is_none());
    }

    #[test]
    fn test_private_note_roundtrip() {
        let (service, adapter) = adapter();
        service.generate_key().unwrap();

        let stored = adapter.prepare_content("diary entry", true).unwrap();
        assert_ne!(stored, "diary entry");

        let view = adapter.view(Note::new("diary".into(), stored, true));
        assert_eq!(view.note.content, "diary entry");
        assert!(view.note.is_private);
        assert!(view.decrypt_error.is_none());
    }

    #[test]
    fn test_create_private_without_key_fails() {
        let (_, adapter) = adapter();
        assert!(matches!(
            adapter.prepare_content("secret", true),
            Err(EncryptionError::KeyUnavailable)
        ));
    }

    #[test]
    fn test_missing_key_classification() {
        let (service, adapter) = adapter();
        service.generate_key().unwrap();
        let stored = adapter.prepare_content("secret", true).unwrap();
        let note = Note::new("n".into(), stored, true);

        // Same note viewed by a session that never loaded a key
        let (_, fresh_adapter) = self::adapter();
        let view = fresh_adapter.view(note);

        assert_eq!(view.decrypt_error, Some(DecryptError::MissingKey));
        assert_eq!(view.note.content, "");
    }

    #[test]
    fn test_tampered_note_classification() {
        let (service, adapter) = adapter();
        service.generate_key().unwrap();

        let mut note = Note::new(
            "n".into(),
            adapter.prepare_content("secret", true).unwrap(),
            true,
        );
        // Flip one ciphertext byte inside the envelope
        let mut raw = BASE64.decode(&note.content).unwrap();
        raw[crate::encryption::NONCE_SIZE] ^= 0x01;
        note.content = BASE64.encode(&raw);

        let view = adapter.view(note);
        assert_eq!(view.decrypt_error, Some(DecryptError::DecryptFailed));
        assert_eq!(view.note.content, "");
    }

    #[test]
    fn test_key_reset_orphans_existing_notes() {
        let (service, adapter) = adapter();
        service.generate_key().unwrap();
        let note = Note::new(
            "n".into(),
            adapter.prepare_content("old secret", true).unwrap(),
            true,
        );

        service.reset_key().unwrap();

        let view = adapter.view(note);
        assert_eq!(view.decrypt_error, Some(DecryptError::DecryptFailed));
        assert_eq!(view.note.content, "");

        // New content under the new key is unaffected
        let fresh = Note::new(
            "n2".into(),
            adapter.prepare_content("new secret", true).unwrap(),
            true,
        );
        assert_eq!(adapter.view(fresh).note.content, "new secret");
    }

    #[test]
    fn test_update_keeps_privacy_of_existing_note() {
        let (service, adapter) = adapter();
        service.generate_key().unwrap();

        let private_note = Note::new(
            "p".into(),
            adapter.prepare_content("v1", true).unwrap(),
            true,
        );
        let updated = adapter.prepare_update(&private_note, "v2").unwrap();
        assert_ne!(updated, "v2");
        assert_eq!(service.decrypt(&updated).unwrap(), "v2");

        let public_note = Note::new("q".into(), "v1".into(), false);
        let updated = adapter.prepare_update(&public_note, "v2").unwrap();
        assert_eq!(updated, "v2");
    }

    #[test]
    fn test_view_all_maps_every_note() {
        let (service, adapter) = adapter();
        service.generate_key().unwrap();

        let notes = vec![
            Note::new("a".into(), "plain".into(), false),
            Note::new(
                "b".into(),
                adapter.prepare_content("hidden", true).unwrap(),
                true,
            ),
        ];

        let views = adapter.view_all(notes);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].note.content, "plain");
        assert_eq!(views[1].note.content, "hidden");
    }
}
