//! Local encryption for private note content
//!
//! This module provides:
//! - ChaCha20-Poly1305 authenticated encryption of note bodies
//! - A single locally-held 256-bit key with generate/reset/clear lifecycle
//! - Durable key storage behind a pluggable `KeyStore`
//! - The `EncryptionService` facade the rest of the app talks to
//!
//! The key never leaves the client. Resetting it is deliberate data loss:
//! anything encrypted under the old key stays unreadable forever.

pub mod crypto;
pub mod errors;
pub mod keystore;
pub mod manager;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use crypto::{
    decrypt, encrypt, generate_key, generate_nonce, Aead, ChaCha20Poly1305Aead, NONCE_SIZE,
    TAG_SIZE,
};
pub use errors::{EncryptionError, EncryptionResult};
pub use keystore::{FileKeyStore, KeyStore, MemoryKeyStore, KEY_RECORD_ID};
pub use manager::KeyManager;
pub use models::{EncryptionKey, KeyStatus, StoredKeyRecord, KEY_ALGORITHM};
pub use service::EncryptionService;
