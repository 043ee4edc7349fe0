//! Key lifecycle management

use std::sync::{Arc, RwLock};

use super::crypto::{Aead, ChaCha20Poly1305Aead};
use super::errors::EncryptionResult;
use super::keystore::KeyStore;
use super::models::{EncryptionKey, KeyStatus, StoredKeyRecord};

/// Owns the in-memory key handle and drives its lifecycle against the store
///
/// Holds at most one key at a time. Loading never fails the caller: a
/// missing or unusable stored record simply leaves the manager without a
/// key.
pub struct KeyManager {
    store: Arc<dyn KeyStore>,
    cipher: Arc<dyn Aead>,
    key: RwLock<Option<EncryptionKey>>,
}

impl KeyManager {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self::with_cipher(store, Arc::new(ChaCha20Poly1305Aead))
    }

    /// Manager generating keys with a caller-supplied cipher
    pub fn with_cipher(store: Arc<dyn KeyStore>, cipher: Arc<dyn Aead>) -> Self {
        Self {
            store,
            cipher,
            key: RwLock::new(None),
        }
    }

    /// Load the stored key into memory, if one exists
    ///
    /// Best-effort and idempotent: absence or an unusable record degrades
    /// to "no key" instead of surfacing an error.
    pub fn initialize(&self) {
        if self.key.read().unwrap().is_some() {
            return;
        }
        match self.import_stored() {
            Some(_) => log::debug!("Encryption key loaded from store"),
            None => log::debug!("No usable encryption key in store"),
        }
    }

    /// Generate a new random key, persist it, and hold it in memory
    ///
    /// Overwrites any previously stored record. If the store rejects the
    /// write, the error propagates and the in-memory state is unchanged.
    pub fn generate(&self) -> EncryptionResult<()> {
        let key = self.cipher.generate_key();
        let record = StoredKeyRecord::export(&key);
        self.store.save(&record)?;

        *self.key.write().unwrap() = Some(key);
        log::info!("Generated new encryption key");
        Ok(())
    }

    /// Whether a key is held in memory or recoverable from the store
    ///
    /// A recoverable stored key is imported as a side effect so the next
    /// check doesn't go back to storage. Never fails.
    pub fn has_key(&self) -> bool {
        if self.key.read().unwrap().is_some() {
            return true;
        }
        self.import_stored().is_some()
    }

    /// The currently held key, if any
    ///
    /// Reads memory only; `initialize` and `has_key` are the load paths.
    pub fn key(&self) -> Option<EncryptionKey> {
        self.key.read().unwrap().clone()
    }

    /// Drop the in-memory key and remove the stored record. Irreversible.
    pub fn clear(&self) -> EncryptionResult<()> {
        *self.key.write().unwrap() = None;
        self.store.clear()?;
        log::info!("Encryption key cleared");
        Ok(())
    }

    /// Replace the key: clear, then generate a fresh one
    ///
    /// The new key is independent of the old; ciphertext produced under
    /// the old key is permanently undecryptable afterwards.
    pub fn reset(&self) -> EncryptionResult<()> {
        self.clear()?;
        self.generate()
    }

    /// Key state summary
    pub fn status(&self) -> KeyStatus {
        let has_key = self.has_key();
        let created_at = if has_key {
            self.store.load().map(|r| r.created_at)
        } else {
            None
        };
        KeyStatus {
            has_key,
            created_at,
        }
    }

    fn import_stored(&self) -> Option<EncryptionKey> {
        let key = self.store.load()?.decode()?;
        *self.key.write().unwrap() = Some(key.clone());
        Some(key)
    }
}
