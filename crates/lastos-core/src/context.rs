use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Storage key for the cached identity-provider ID token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key for the current remote session id.
pub const SESSION_ID_KEY: &str = "sessionId";
/// Storage key for the player's display name.
pub const PLAYER_NAME_KEY: &str = "playerName";

/// Errors from a persistent key/value store.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Unavailable,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "store parse error: {e}"),
            StoreError::Serialize(e) => write!(f, "store serialize error: {e}"),
            StoreError::Unavailable => write!(f, "storage is not available"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// A small string key/value store (browser `localStorage` or an equivalent).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

/// Store backed by a flat TOML table of strings on disk.
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_table(&self) -> Result<toml::Table, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => toml::from_str(&contents).map_err(StoreError::Parse),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(toml::Table::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write_table(&self, table: &toml::Table) -> Result<(), StoreError> {
        let contents = toml::to_string(table).map_err(StoreError::Serialize)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let table = self.read_table()?;
        Ok(table
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut table = self.read_table()?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        self.write_table(&table)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut table = self.read_table()?;
        if table.remove(key).is_some() {
            self.write_table(&table)?;
        }
        Ok(())
    }
}

/// Browser `localStorage`. Looked up on every call; the handle itself is not `Send`.
#[cfg(target_family = "wasm")]
#[derive(Debug, Default)]
pub struct LocalStorage;

#[cfg(target_family = "wasm")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_family = "wasm")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StoreError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StoreError::Unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StoreError::Unavailable)
    }
}

/// The identifiers a signed-in player carries between views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub auth_token: Option<String>,
    pub session_id: Option<String>,
    pub player_name: Option<String>,
}

/// Shared session context: loaded once at startup, handed to the API client
/// and the authenticator, cleared on sign-out.
///
/// Cloning yields another handle to the same state. Every write goes to the
/// in-memory copy first and then to the backing store.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<RwLock<Credentials>>,
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let creds = self.credentials();
        f.debug_struct("SessionContext")
            .field("has_token", &creds.auth_token.is_some())
            .field("session_id", &creds.session_id)
            .field("player_name", &creds.player_name)
            .finish()
    }
}

impl SessionContext {
    /// Read the persisted identifiers from `store`.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let creds = Credentials {
            auth_token: store.get(AUTH_TOKEN_KEY)?,
            session_id: store.get(SESSION_ID_KEY)?,
            player_name: store.get(PLAYER_NAME_KEY)?,
        };
        tracing::debug!(
            has_token = creds.auth_token.is_some(),
            has_session = creds.session_id.is_some(),
            "Session context loaded"
        );
        Ok(Self {
            inner: Arc::new(RwLock::new(creds)),
            store,
        })
    }

    /// Empty context over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Credentials::default())),
            store: Arc::new(MemoryStore::new()),
        }
    }

    pub fn credentials(&self) -> Credentials {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn auth_token(&self) -> Option<String> {
        self.credentials().auth_token
    }

    pub fn session_id(&self) -> Option<String> {
        self.credentials().session_id
    }

    pub fn player_name(&self) -> Option<String> {
        self.credentials().player_name
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth_token().is_some()
    }

    /// Record a successful sign-in.
    pub fn set_auth(&self, token: &str, player_name: &str) -> Result<(), StoreError> {
        self.update(|c| {
            c.auth_token = Some(token.to_string());
            c.player_name = Some(player_name.to_string());
        });
        self.store.set(AUTH_TOKEN_KEY, token)?;
        self.store.set(PLAYER_NAME_KEY, player_name)
    }

    /// Replace the ID token after a refresh.
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.update(|c| c.auth_token = Some(token.to_string()));
        self.store.set(AUTH_TOKEN_KEY, token)
    }

    pub fn set_session_id(&self, session_id: &str) -> Result<(), StoreError> {
        self.update(|c| c.session_id = Some(session_id.to_string()));
        self.store.set(SESSION_ID_KEY, session_id)
    }

    /// Drop only the token (rejected sign-in).
    pub fn clear_token(&self) -> Result<(), StoreError> {
        self.update(|c| c.auth_token = None);
        self.store.remove(AUTH_TOKEN_KEY)
    }

    /// Drop every cached identifier (sign-out).
    pub fn clear(&self) -> Result<(), StoreError> {
        self.update(|c| *c = Credentials::default());
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(PLAYER_NAME_KEY)?;
        self.store.remove(SESSION_ID_KEY)
    }

    fn update(&self, f: impl FnOnce(&mut Credentials)) {
        let mut creds = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut creds);
    }
}
