//! Cryptographic operations for note content encryption/decryption
//!
//! Stateless algorithm layer: every function takes the key as an
//! argument. Whether a key exists at all is the lifecycle manager's
//! concern, one layer up.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chacha20poly1305::{
    aead::{Aead as _, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;

use super::errors::{EncryptionError, EncryptionResult};
use super::models::EncryptionKey;

/// Nonce size in bytes for ChaCha20-Poly1305
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size in bytes
pub const TAG_SIZE: usize = 16;

/// AEAD capability: key generation plus the envelope codec
///
/// Implementations own their randomness; substituting one swaps both the
/// cipher and its entropy source (a platform crypto facility, a test
/// double). The envelope layout is fixed: 12-byte nonce, then ciphertext
/// with a 16-byte tag, base64-encoded as one token.
pub trait Aead: Send + Sync {
    fn generate_key(&self) -> EncryptionKey;
    fn encrypt(&self, plaintext: &str, key: &EncryptionKey) -> EncryptionResult<String>;
    fn decrypt(&self, envelope: &str, key: &EncryptionKey) -> EncryptionResult<String>;
}

/// The ChaCha20-Poly1305 engine used in production
#[derive(Default)]
pub struct ChaCha20Poly1305Aead;

impl Aead for ChaCha20Poly1305Aead {
    fn generate_key(&self) -> EncryptionKey {
        generate_key()
    }

    fn encrypt(&self, plaintext: &str, key: &EncryptionKey) -> EncryptionResult<String> {
        encrypt(plaintext, key)
    }

    fn decrypt(&self, envelope: &str, key: &EncryptionKey) -> EncryptionResult<String> {
        decrypt(envelope, key)
    }
}

/// Generate a new random 256-bit encryption key
pub fn generate_key() -> EncryptionKey {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    EncryptionKey::new(key)
}

/// Generate a random nonce for encryption
///
/// Always drawn fresh: a nonce must never repeat under the same key.
pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

/// Encrypt plaintext into a self-contained envelope
///
/// The envelope is `base64(nonce || ciphertext || tag)`, a single opaque
/// token that fits in a note's text content field.
pub fn encrypt(plaintext: &str, key: &EncryptionKey) -> EncryptionResult<String> {
    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;

    let nonce_bytes = generate_nonce();
    let nonce = Nonce::from_slice(&nonce_bytes);

    // ChaCha20-Poly1305 appends the auth tag to the ciphertext
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| EncryptionError::EncryptionFailed(e.to_string()))?;

    let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(combined))
}

/// Decrypt an envelope produced by [`encrypt`]
///
/// Returns the original plaintext exactly. Every failure mode (bad
/// encoding, truncated data, tag mismatch) collapses into the single
/// `DecryptionFailed` kind: the AEAD cannot tell a wrong key from
/// corrupted data, so no attempt is made to guess.
pub fn decrypt(envelope: &str, key: &EncryptionKey) -> EncryptionResult<String> {
    let combined = BASE64
        .decode(envelope)
        .map_err(|_| EncryptionError::DecryptionFailed)?;

    if combined.len() < NONCE_SIZE + TAG_SIZE {
        return Err(EncryptionError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_bytes())
        .map_err(|_| EncryptionError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| EncryptionError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| EncryptionError::DecryptionFailed)
}
