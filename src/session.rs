//! Session store - bearer token and cached user profile
//!
//! The session is an explicit context object: built once at startup
//! (hydrated from persisted storage), shared by `Arc` with the gateway and
//! every controller, torn down by `logout`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::types::User;

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key of the serialized user profile
pub const USER_KEY: &str = "usuario";

/// Persistent key/value storage for session data.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Storage backends
// ═══════════════════════════════════════════════════════════════════════════

/// In-memory storage, lost when the process exits.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object in a file.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the file if it exists. A missing file is an empty store; an
    /// unreadable one is reported.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session file {}", path.display()))?;
            match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Discarding corrupt session file");
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create session directory {}", parent.display())
                })?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(parent, fs::Permissions::from_mode(0o700))?;
                }
            }
        }
        let raw = serde_json::to_string_pretty(entries).context("Failed to encode session")?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Failed to open session file {}", self.path.display()))?;

        // The mode above only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(raw.as_bytes())
            .with_context(|| format!("Failed to write session file {}", self.path.display()))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Current credentials, shared by the gateway and the views.
pub struct Session {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<SessionState>,
}

impl Session {
    /// Builds the session and hydrates it from `storage`, so a restart does
    /// not force a new login.
    pub fn hydrate(storage: Arc<dyn SessionStorage>) -> Self {
        let token = storage.get(TOKEN_KEY);
        let user = storage
            .get(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable stored profile");
                    None
                }
            });

        if let Some(user) = &user {
            debug!(login = %user.login, "Session restored from storage");
        }

        Self {
            storage,
            state: RwLock::new(SessionState { token, user }),
        }
    }

    /// Stores a freshly issued token and profile.
    pub fn establish(&self, token: String, user: User) -> Result<()> {
        let profile = serde_json::to_string(&user).context("Failed to encode user profile")?;
        self.storage.set(TOKEN_KEY, &token)?;
        self.storage.set(USER_KEY, &profile)?;

        let mut state = self.state.write();
        state.token = Some(token);
        state.user = Some(user);
        Ok(())
    }

    /// Clears the persisted token and profile. No backend call is made.
    pub fn logout(&self) {
        {
            let mut state = self.state.write();
            state.token = None;
            state.user = None;
        }
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to clear stored session key");
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    /// True iff a profile is loaded in memory.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.state
            .read()
            .user
            .as_ref()
            .is_some_and(|u| u.is_admin())
    }
}
