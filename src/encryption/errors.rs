//! Encryption error types

use thiserror::Error;

/// Errors that can occur during encryption operations
///
/// Callers branch on the variant, never on the message text:
/// `KeyUnavailable` and `DecryptionFailed` are the two kinds the note
/// layer tells apart when deciding what to show the user.
#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("Encryption key not available. Generate a key in Settings first.")]
    KeyUnavailable,

    /// The envelope did not authenticate: wrong key, or tampered/corrupted
    /// data. The AEAD gives no signal separating those sub-causes.
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<EncryptionError> for String {
    fn from(err: EncryptionError) -> Self {
        err.to_string()
    }
}

/// Result type alias for encryption operations
pub type EncryptionResult<T> = Result<T, EncryptionError>;
