//! Session persistence. A session is the bearer token plus the username it was
//! issued for; the two are written together and cleared together. Storage sits
//! behind [`SessionStore`] so the file-backed store used by the CLI can be
//! swapped for [`MemoryStore`] in tests.

use crate::errors::AppError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct Session {
    username: String,
    token: SecretString,
}

impl Session {
    #[must_use]
    pub fn new(username: impl Into<String>, token: SecretString) -> Self {
        Self {
            username: username.into(),
            token,
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("token", &"***")
            .finish()
    }
}

/// On-disk layout. Both keys are optional so a half-written record can be
/// detected and discarded instead of failing to parse.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

impl StoredSession {
    fn from_session(session: &Session) -> Self {
        Self {
            token: Some(session.token.expose_secret().to_string()),
            username: Some(session.username.clone()),
        }
    }

    fn into_session(self) -> Option<Session> {
        match (self.token, self.username) {
            (Some(token), Some(username)) if !token.is_empty() && !username.is_empty() => {
                Some(Session::new(username, SecretString::from(token)))
            }
            (None, None) => None,
            _ => {
                warn!("ignoring incomplete stored session");
                None
            }
        }
    }
}

/// Persistence interface for the current session.
pub trait SessionStore {
    /// Reads the stored session, `None` when absent or incomplete.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the backing storage cannot be read.
    fn load(&self) -> Result<Option<Session>, AppError>;

    /// Replaces the stored session.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the session cannot be written.
    fn save(&self, session: &Session) -> Result<(), AppError>;

    /// Removes token and username.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the stored session cannot be removed.
    fn clear(&self) -> Result<(), AppError>;
}

/// JSON file with `token` and `username` keys.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> AppError {
        AppError::Storage(format!("failed to {action} {}: {err}", self.path.display()))
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<Session>, AppError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.storage_error("read", err)),
        };

        match serde_json::from_str::<StoredSession>(&contents) {
            Ok(stored) => Ok(stored.into_session()),
            Err(err) => {
                warn!("ignoring unreadable session file {}: {}", self.path.display(), err);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| self.storage_error("create", err))?;
            }
        }

        let contents = serde_json::to_string_pretty(&StoredSession::from_session(session))
            .map_err(|err| self.storage_error("encode", err))?;

        write_private(&self.path, contents.as_bytes())
            .map_err(|err| self.storage_error("write", err))?;

        debug!("session stored in {}", self.path.display());

        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("session removed from {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.storage_error("remove", err)),
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

/// In-process store, used by tests and by callers that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoredSession>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: &Session) -> Self {
        Self {
            inner: Mutex::new(StoredSession::from_session(session)),
        }
    }

    /// Raw stored token, for assertions.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|s| s.token.clone())
    }

    /// Raw stored username, for assertions.
    #[must_use]
    pub fn username(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|s| s.username.clone())
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Session>, AppError> {
        let guard = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("session lock poisoned".to_string()))?;

        Ok(StoredSession {
            token: guard.token.clone(),
            username: guard.username.clone(),
        }
        .into_session())
    }

    fn save(&self, session: &Session) -> Result<(), AppError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("session lock poisoned".to_string()))?;
        *guard = StoredSession::from_session(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("session lock poisoned".to_string()))?;
        *guard = StoredSession::default();
        Ok(())
    }
}
