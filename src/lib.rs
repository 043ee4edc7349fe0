pub mod encryption;
pub mod notes;

pub use encryption::{EncryptionError, EncryptionResult, EncryptionService};
pub use notes::{DecryptError, Note, NoteContentAdapter, NoteView};
