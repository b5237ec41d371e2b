use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const TOKEN_KEY: &str = "token";
const SELECTED_USER_KEY: &str = "selected_user_id";
const USERNAME_KEY: &str = "username";
const TMDB_API_KEY: &str = "tmdb_api_key";

/// Store shared between the HTTP client and the command layer
pub type SharedCredentials = Arc<Mutex<CredentialStore>>;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Durable client-side key-value store
///
/// Holds the session token and the selected profile id. Written only on
/// explicit user actions (login, profile selection, logout) and when the
/// backend rejects the token.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    /// Open the store at `path`, loading it if the file exists
    pub fn open(path: PathBuf) -> Result<Self> {
        let mut store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn shared(self) -> SharedCredentials {
        Arc::new(Mutex::new(self))
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_token(&self) -> Option<&String> {
        self.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, token: String) {
        self.set(TOKEN_KEY.to_string(), token);
    }

    /// Drop the session token and the cached username, persisting the removal
    pub fn clear_token(&mut self) -> Result<()> {
        self.remove(TOKEN_KEY);
        self.remove(USERNAME_KEY);
        self.save()
    }

    pub fn get_username(&self) -> Option<&String> {
        self.get(USERNAME_KEY)
    }

    pub fn set_username(&mut self, username: String) {
        self.set(USERNAME_KEY.to_string(), username);
    }

    pub fn get_selected_user_id(&self) -> Option<u64> {
        self.get(SELECTED_USER_KEY).and_then(|s| s.parse().ok())
    }

    pub fn set_selected_user_id(&mut self, user_id: u64) {
        self.set(SELECTED_USER_KEY.to_string(), user_id.to_string());
    }

    pub fn clear_selected_user_id(&mut self) {
        self.remove(SELECTED_USER_KEY);
    }

    /// TMDB key from the store, falling back to `TMDB_API_KEY` in the environment
    pub fn get_tmdb_api_key(&self) -> Option<String> {
        self.get(TMDB_API_KEY)
            .cloned()
            .or_else(|| std::env::var("TMDB_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set(TMDB_API_KEY.to_string(), key);
    }

    pub fn get_all_keys(&self) -> Vec<String> {
        self.credentials.keys().cloned().collect()
    }
}
