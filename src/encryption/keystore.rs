//! Durable storage for the exported key record

use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use super::errors::{EncryptionError, EncryptionResult};
use super::models::StoredKeyRecord;

/// Fixed identifier the key record is stored under
pub const KEY_RECORD_ID: &str = "encryption-key";

/// Persistence capability for the single exported key record
///
/// Pure persistence, no cryptographic validation. A record that cannot
/// be read back is reported as absent rather than as an error, so a
/// storage format change degrades to "no key" instead of wedging the app.
pub trait KeyStore: Send + Sync {
    /// Load the stored record, if a readable one exists
    fn load(&self) -> Option<StoredKeyRecord>;

    /// Persist the record, overwriting any previous one
    fn save(&self, record: &StoredKeyRecord) -> EncryptionResult<()>;

    /// Remove the stored record; removing nothing is not an error
    fn clear(&self) -> EncryptionResult<()>;
}

/// Key store backed by a single JSON file under the app data directory
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        let path = data_dir
            .join(".keys")
            .join(format!("{}.json", KEY_RECORD_ID));
        Self { path }
    }

    /// Platform-default data directory for the app
    pub fn default_data_dir() -> EncryptionResult<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("mneme"))
            .ok_or_else(|| EncryptionError::StoreUnavailable("data directory not found".to_string()))
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self) -> Option<StoredKeyRecord> {
        let data = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Stored key record is unreadable, treating as absent: {}", e);
                None
            }
        }
    }

    fn save(&self, record: &StoredKeyRecord) -> EncryptionResult<()> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| EncryptionError::StoreUnavailable(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| EncryptionError::StoreUnavailable(e.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|e| EncryptionError::StoreUnavailable(e.to_string()))?;

        // Restrict permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }

        Ok(())
    }

    fn clear(&self) -> EncryptionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EncryptionError::StoreUnavailable(e.to_string())),
        }
    }
}

/// In-memory key store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryKeyStore {
    record: RwLock<Option<StoredKeyRecord>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryKeyStore {
    fn load(&self) -> Option<StoredKeyRecord> {
        self.record.read().unwrap().clone()
    }

    fn save(&self, record: &StoredKeyRecord) -> EncryptionResult<()> {
        *self.record.write().unwrap() = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> EncryptionResult<()> {
        *self.record.write().unwrap() = None;
        Ok(())
    }
}
