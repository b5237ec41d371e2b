use color_eyre::eyre::eyre;
use color_eyre::Result;
use movieflix_config::{Config, CredentialStore, PathManager, SharedCredentials};
use movieflix_sources::BackendClient;
use std::sync::{Arc, MutexGuard};

/// Everything a command needs: paths, loaded config, the shared credential store
/// and a backend client bound to both
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: SharedCredentials,
    pub backend: BackendClient,
}

impl AppContext {
    pub fn load(paths: PathManager, config: Config) -> Result<Self> {
        let credentials_file = paths.credentials_file();
        let store = CredentialStore::open(credentials_file.clone())
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
        let credentials = store.shared();
        let backend = BackendClient::from_config(&config, Arc::clone(&credentials));

        Ok(Self {
            paths,
            config,
            credentials,
            backend,
        })
    }

    pub fn credentials(&self) -> Result<MutexGuard<'_, CredentialStore>> {
        self.credentials
            .lock()
            .map_err(|_| eyre!("Credential store lock poisoned"))
    }

    /// Apply `f` to the credential store and persist the result
    pub fn update_credentials<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut CredentialStore),
    {
        let mut store = self.credentials()?;
        f(&mut store);
        store
            .save()
            .map_err(|e| eyre!("Failed to save credentials: {}", e))
    }

    pub fn selected_user_id(&self) -> Result<Option<u64>> {
        Ok(self.credentials()?.get_selected_user_id())
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials()
            .map(|store| store.get_token().is_some())
            .unwrap_or(false)
    }
}
