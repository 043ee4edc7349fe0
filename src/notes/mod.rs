//! Note content handling over the encryption service
//!
//! The remote note store only ever sees a note's `content` as an opaque
//! string. This module converts between that stored body and the
//! plaintext view the UI renders, and classifies decryption failures
//! for display.

pub mod content;
pub mod models;

pub use content::NoteContentAdapter;
pub use models::{DecryptError, Note, NoteView};
