//! Session contract and the stores that persist it.
//!
//! A session is two string entries, `auth_token` and `user_id`, written and
//! deleted together. A store holding only one of them has no session.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_ID_KEY: &str = "user_id";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Result<Self, CoreError> {
        let user_id = user_id.into();
        let token = token.into();
        if user_id.is_empty() || token.is_empty() {
            return Err(CoreError::Validation(
                "a session needs both a user id and a token".into(),
            ));
        }
        Ok(Self { user_id, token })
    }

    /// Rebuild a session from stored entries; `None` unless both are present
    /// and non-empty.
    pub fn from_entries(token: Option<&str>, user_id: Option<&str>) -> Option<Self> {
        Self::new(user_id?, token?).ok()
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Persistence for the current session. Read on every request, written on
/// login, cleared on logout or expiry.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Self {
        let store = Self::new();
        write_entries(&mut store.lock_write(), session);
        store
    }

    /// Raw entry access, for inspecting partially-written state.
    pub fn entry(&self, key: &str) -> Option<String> {
        self.lock_read().get(key).cloned()
    }

    pub fn set_entry(&self, key: &str, value: &str) {
        self.lock_write().insert(key.to_string(), value.to_string());
    }

    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, String>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, String>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        read_entries(&self.lock_read())
    }

    fn save(&self, session: &Session) -> Result<(), CoreError> {
        write_entries(&mut self.lock_write(), session);
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        remove_entries(&mut self.lock_write());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File store
// ---------------------------------------------------------------------------

/// Session entries kept as a flat JSON object in a file.
///
/// Unrelated keys in the file are preserved. A missing or unreadable file
/// means no session.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> HashMap<String, String> {
        std::fs::read(&self.path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), CoreError> {
        if map.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(store_error(&self.path, e)),
            };
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| store_error(parent, e))?;
            }
        }
        let json = serde_json::to_vec_pretty(map)
            .map_err(|e| CoreError::SessionStore(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| store_error(&self.path, e))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        read_entries(&self.read_map())
    }

    fn save(&self, session: &Session) -> Result<(), CoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_map();
        write_entries(&mut map, session);
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), CoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_map();
        remove_entries(&mut map);
        self.write_map(&map)
    }
}

fn store_error(path: &Path, err: std::io::Error) -> CoreError {
    CoreError::SessionStore(format!("{}: {err}", path.display()))
}

fn read_entries(map: &HashMap<String, String>) -> Option<Session> {
    Session::from_entries(
        map.get(AUTH_TOKEN_KEY).map(String::as_str),
        map.get(USER_ID_KEY).map(String::as_str),
    )
}

fn write_entries(map: &mut HashMap<String, String>, session: &Session) {
    map.insert(AUTH_TOKEN_KEY.to_string(), session.token.clone());
    map.insert(USER_ID_KEY.to_string(), session.user_id.clone());
}

fn remove_entries(map: &mut HashMap<String, String>) {
    map.remove(AUTH_TOKEN_KEY);
    map.remove(USER_ID_KEY);
}
