//! Core SoftHaus functionality
//!
//! This module contains the main SoftHaus struct and its implementation,
//! providing centralized coordination for database connections, stores and
//! destroy signals.

use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use store_object::traits::StoreObject;

use crate::errors::SoftHausError;
use config::{DatabaseConfig, SignalConfig};
use signal_system::SignalManager;

/// Main SoftHaus coordinator that manages database connection and store objects
pub struct SoftHaus {
    pool: PgPool,
    signal_manager: Arc<SignalManager>,
    stores: HashMap<String, Box<dyn std::any::Any + Send + Sync>>,
}

impl SoftHaus {
    /// Create new SoftHaus with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, SoftHausError> {
        Self::with_signal_config(config, SignalConfig::default()).await
    }

    /// Create new SoftHaus with database connection and signal configuration
    pub async fn with_signal_config(
        config: DatabaseConfig,
        signal_config: SignalConfig,
    ) -> Result<Self, SoftHausError> {
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;

        Ok(Self {
            pool,
            signal_manager: Arc::new(SignalManager::with_config(signal_config)),
            stores: HashMap::new(),
        })
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Shared signal manager; pass it to stores whose lifecycle events
    /// should reach the registered callbacks
    pub fn signal_manager(&self) -> Arc<SignalManager> {
        self.signal_manager.clone()
    }

    /// Register a store object with a given name
    pub fn register_store<T>(&mut self, name: String, store: T) -> Result<(), SoftHausError>
    where
        T: StoreObject + Send + Sync + 'static,
    {
        if self.stores.contains_key(&name) {
            return Err(SoftHausError::StoreAlreadyRegistered(name));
        }

        self.stores.insert(name, Box::new(store));
        Ok(())
    }

    /// Get a registered store object by name
    pub fn get_store<T>(&self, name: &str) -> Result<&T, SoftHausError>
    where
        T: StoreObject + Send + Sync + 'static,
    {
        self.stores
            .get(name)
            .and_then(|store| store.downcast_ref::<T>())
            .ok_or_else(|| SoftHausError::StoreNotFound(name.to_string()))
    }

    /// Get a mutable reference to a registered store object by name
    pub fn get_store_mut<T>(&mut self, name: &str) -> Result<&mut T, SoftHausError>
    where
        T: StoreObject + Send + Sync + 'static,
    {
        self.stores
            .get_mut(name)
            .and_then(|store| store.downcast_mut::<T>())
            .ok_or_else(|| SoftHausError::StoreNotFound(name.to_string()))
    }

    /// List all registered store names
    pub fn list_stores(&self) -> Vec<&String> {
        self.stores.keys().collect()
    }

    /// Remove a store object by name
    pub fn unregister_store(&mut self, name: &str) -> Result<(), SoftHausError> {
        self.stores
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| SoftHausError::StoreNotFound(name.to_string()))
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), SoftHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
