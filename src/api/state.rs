//! Application state for the rota API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ConfigLoader;
use crate::store::MemoryStore;

/// Shared application state.
///
/// The configuration is read-only. The record store sits behind a mutex, so
/// there is exactly one writer at a time and each handler sees the store as
/// of the moment it takes the lock.
#[derive(Clone)]
pub struct AppState {
    /// The loaded catalog configuration.
    config: Arc<ConfigLoader>,
    /// The operational records.
    store: Arc<Mutex<MemoryStore>>,
}

impl AppState {
    /// Creates application state from a configuration and a record store.
    pub fn new(config: ConfigLoader, store: MemoryStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the locked record store.
    pub fn store(&self) -> &Mutex<MemoryStore> {
        &self.store
    }
}
