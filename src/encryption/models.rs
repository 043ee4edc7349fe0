//! Encryption data models

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Algorithm tag written into exported key records
pub const KEY_ALGORITHM: &str = "chacha20poly1305";

/// Encryption key with secure memory handling
///
/// Lives in process memory only; the durable form is [`StoredKeyRecord`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    /// The 256-bit key
    key: [u8; 32],
}

impl EncryptionKey {
    /// Create a new encryption key from raw bytes
    pub(crate) fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Get the key bytes
    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Durable exported form of an [`EncryptionKey`]
///
/// The store holds zero or one record; writing always overwrites and
/// there is no history. Decoding is tolerant: any mismatch means the
/// record is unusable and callers behave as if no key exists.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredKeyRecord {
    /// AEAD algorithm this key material is for
    pub algorithm: String,
    /// Key material (base64-encoded)
    pub key: String,
    /// When the key was generated
    pub created_at: DateTime<Utc>,
}

impl StoredKeyRecord {
    /// Export a key into its durable form
    pub fn export(key: &EncryptionKey) -> Self {
        Self {
            algorithm: KEY_ALGORITHM.to_string(),
            key: BASE64.encode(key.as_bytes()),
            created_at: Utc::now(),
        }
    }

    /// Import the key material, or `None` if the record is unusable
    pub fn decode(&self) -> Option<EncryptionKey> {
        if self.algorithm != KEY_ALGORITHM {
            log::warn!(
                "Stored key record uses unsupported algorithm '{}'",
                self.algorithm
            );
            return None;
        }

        let bytes = BASE64.decode(&self.key).ok()?;
        let key: [u8; 32] = bytes.try_into().ok()?;
        Some(EncryptionKey::new(key))
    }
}

impl std::fmt::Debug for StoredKeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredKeyRecord")
            .field("algorithm", &self.algorithm)
            .field("key", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Key state summary for the settings UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatus {
    pub has_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
