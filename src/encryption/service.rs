//! Encryption service facade

use std::sync::Arc;

use super::crypto::{Aead, ChaCha20Poly1305Aead};
use super::errors::{EncryptionError, EncryptionResult};
use super::keystore::{FileKeyStore, KeyStore};
use super::manager::KeyManager;
use super::models::KeyStatus;

/// The one object the rest of the app talks to for encryption
///
/// Construct one per session with the store it should persist to. All
/// key access goes through the internal [`KeyManager`]; no other
/// component reads or writes the key store directly.
pub struct EncryptionService {
    manager: KeyManager,
    cipher: Arc<dyn Aead>,
}

impl EncryptionService {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self::with_cipher(store, Arc::new(ChaCha20Poly1305Aead))
    }

    /// Service running on a caller-supplied cipher
    pub fn with_cipher(store: Arc<dyn KeyStore>, cipher: Arc<dyn Aead>) -> Self {
        Self {
            manager: KeyManager::with_cipher(store, cipher.clone()),
            cipher,
        }
    }

    /// Service persisting to the platform-default data directory
    pub fn with_default_store() -> EncryptionResult<Self> {
        let data_dir = FileKeyStore::default_data_dir()?;
        Ok(Self::new(Arc::new(FileKeyStore::new(data_dir))))
    }

    /// Load any previously stored key. Idempotent, never fails.
    pub fn initialize(&self) {
        self.manager.initialize();
    }

    /// Generate and persist a fresh key, replacing any held one
    pub fn generate_key(&self) -> EncryptionResult<()> {
        self.manager.generate()
    }

    /// Whether a key is available for encrypt/decrypt
    pub fn has_key(&self) -> bool {
        self.manager.has_key()
    }

    /// Key state summary for the settings UI
    pub fn status(&self) -> KeyStatus {
        self.manager.status()
    }

    /// Encrypt plaintext under the held key
    ///
    /// Fails with `KeyUnavailable` when no key is held.
    pub fn encrypt(&self, plaintext: &str) -> EncryptionResult<String> {
        let key = self.manager.key().ok_or(EncryptionError::KeyUnavailable)?;
        self.cipher.encrypt(plaintext, &key)
    }

    /// Decrypt an envelope under the held key
    ///
    /// Fails with `KeyUnavailable` when no key is held, and with
    /// `DecryptionFailed` when the envelope does not authenticate under
    /// the held key. The two kinds stay distinct; callers depend on it.
    pub fn decrypt(&self, envelope: &str) -> EncryptionResult<String> {
        let key = self.manager.key().ok_or(EncryptionError::KeyUnavailable)?;
        self.cipher.decrypt(envelope, &key)
    }

    /// Discard the current key and generate a replacement
    ///
    /// Private notes encrypted under the old key become permanently
    /// undecryptable.
    pub fn reset_key(&self) -> EncryptionResult<()> {
        self.manager.reset()
    }

    /// Discard the current key without a replacement
    pub fn clear_key(&self) -> EncryptionResult<()> {
        self.manager.clear()
    }
}
