//! Persistence of the last authenticated user between runs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{error::AppResult, models::User};

/// Pass-through storage for the session record.
///
/// Reads are synchronous: the session slice is seeded from it before any
/// request is issued.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> AppResult<Option<User>>;
    fn save(&self, user: &User) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// JSON file holding the user payload
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> AppResult<Option<User>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, user: &User) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(user)?)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process storage, for tests and for runs that must not touch disk
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    user: Mutex<Option<User>>,
}

impl MemorySessionStorage {
    pub fn with_user(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    pub fn stored(&self) -> Option<User> {
        self.user.lock().map(|u| u.clone()).unwrap_or(None)
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> AppResult<Option<User>> {
        Ok(self.stored())
    }

    fn save(&self, user: &User) -> AppResult<()> {
        if let Ok(mut slot) = self.user.lock() {
            *slot = Some(user.clone());
        }
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        if let Ok(mut slot) = self.user.lock() {
            *slot = None;
        }
        Ok(())
    }
}
