//! Application state management

use guesthub_core::{GuestStore, HubConfig, LocalStorage, Result, SessionStore, StoreOptions};

/// Everything one front end instance works with
pub struct AppState {
    pub config: HubConfig,
    pub guests: GuestStore<LocalStorage>,
    pub session: SessionStore<LocalStorage>,
}

impl AppState {
    /// Open the storage file named by the config
    pub fn new(config: HubConfig) -> Result<Self> {
        let db_path = config.database_path()?;

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let storage = LocalStorage::open(&db_path)?;
        tracing::debug!(path = %db_path.display(), "Storage opened");
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: HubConfig, storage: LocalStorage) -> Result<Self> {
        let guests = GuestStore::open(storage.clone(), StoreOptions::from(&config))?
            .with_subscription(storage.subscribe());
        let session = SessionStore::open(storage)?;

        Ok(Self {
            config,
            guests,
            session,
        })
    }

    /// Name recorded on new requests, if a staff member is selected
    pub fn submitter(&self) -> Option<String> {
        let name = self.session.current_user();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Pull in changes written by other instances
    pub fn sync(&mut self) -> Result<()> {
        self.guests.sync()?;
        self.session.reload()
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let storage = LocalStorage::open_in_memory().unwrap();
    AppState::with_storage(HubConfig::default(), storage).unwrap()
}
