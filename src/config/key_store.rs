use crate::domain::ports::KeyStore;
use crate::utils::error::{PlayError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredential {
    api_key: String,
    saved_at: DateTime<Utc>,
}

/// 憑證存放在單一 TOML 檔案中，刪除檔案即代表沒有金鑰
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the current key was saved, if there is one.
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read()?.map(|stored| stored.saved_at))
    }

    fn read(&self) -> Result<Option<StoredCredential>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PlayError::Io(e)),
        };

        let stored: StoredCredential = toml::from_str(&content).map_err(|e| {
            PlayError::KeyStoreError {
                message: format!("{} is not a valid credential file: {}", self.path.display(), e),
            }
        })?;
        Ok(Some(stored))
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.read()?.map(|stored| stored.api_key))
    }

    fn set(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredCredential {
            api_key: value.to_string(),
            saved_at: Utc::now(),
        };
        fs::write(&self.path, toml::to_string(&stored)?)?;

        tracing::debug!("Credential written to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Credential file {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PlayError::Io(e)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    slot: RwLock<Option<String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(value: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(value.into())),
        }
    }
}

fn poisoned() -> PlayError {
    PlayError::KeyStoreError {
        message: "in-memory key slot lock poisoned".to_string(),
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.slot.read().map_err(|_| poisoned())?.clone())
    }

    fn set(&self, value: &str) -> Result<()> {
        *self.slot.write().map_err(|_| poisoned())? = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.write().map_err(|_| poisoned())? = None;
        Ok(())
    }
}
