//! Biblio client
//!
//! Client-side state for the Biblio library management front end: the
//! session and entity-list slices, the services that fill them from the
//! REST JSON API, and headless view models on top.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod services;
pub mod store;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::{ApiClient, LibraryApi};
use store::{AppStore, FileSessionStorage, SessionStorage};

/// Application state shared by every screen
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: AppStore,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, api: Arc<dyn LibraryApi>, storage: Arc<dyn SessionStorage>) -> Self {
        let store = AppStore::new(storage, config.ui.dark_mode);
        let services = Arc::new(services::Services::new(api, &store));
        Self {
            config: Arc::new(config),
            store,
            services,
        }
    }

    /// Wire the HTTP client and the on-disk session file from `config`
    pub fn connect(config: AppConfig) -> AppResult<Self> {
        let api = Arc::new(ApiClient::new(&config.api)?);
        let storage = Arc::new(FileSessionStorage::new(config.session.storage_path.clone()));
        tracing::debug!(path = %storage.path().display(), "Session storage");
        Ok(Self::new(config, api, storage))
    }
}
