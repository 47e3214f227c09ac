use crate::event::DatabaseEvent;
use crate::types::EventCallback;
use config::SignalConfig;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Signal manager for database event notifications
///
/// Callbacks run sequentially in registration order. A failing callback is
/// logged and does not stop the remaining callbacks, so a single misbehaving
/// subscriber cannot suppress anyone else's notification.
pub struct SignalManager {
    callbacks: std::sync::RwLock<Vec<EventCallback>>,
    config: SignalConfig,
}

impl std::fmt::Debug for SignalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalManager")
            .field("callback_count", &self.callback_count())
            .field("max_callbacks", &self.config.max_callbacks)
            .finish()
    }
}

impl SignalManager {
    pub fn new() -> Self {
        Self::with_config(SignalConfig::default())
    }

    pub fn with_config(config: SignalConfig) -> Self {
        Self {
            callbacks: std::sync::RwLock::new(Vec::new()),
            config,
        }
    }

    /// Add event callback
    ///
    /// Returns false when the configured callback limit is reached and the
    /// callback was not registered.
    pub fn add_callback<F, Fut>(&self, callback: F) -> bool
    where
        F: Fn(DatabaseEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let wrapped: EventCallback = Arc::new(move |event| {
            let fut: BoxFuture<'static, anyhow::Result<()>> = Box::pin(callback(event));
            fut
        });

        if let Ok(mut callbacks) = self.callbacks.write() {
            if callbacks.len() >= self.config.max_callbacks {
                tracing::warn!(
                    max_callbacks = self.config.max_callbacks,
                    "signal callback limit reached, registration rejected"
                );
                return false;
            }
            callbacks.push(wrapped);
            true
        } else {
            false
        }
    }

    /// Emit event to all subscribers
    pub async fn emit(&self, event: DatabaseEvent) {
        let callbacks: Vec<EventCallback> = match self.callbacks.read() {
            Ok(callbacks) => callbacks.clone(),
            Err(_) => return,
        };

        let slow_threshold = Duration::from_millis(self.config.slow_callback_warn_ms);
        for (index, callback) in callbacks.iter().enumerate() {
            let started = Instant::now();
            if let Err(error) = callback(event.clone()).await {
                tracing::warn!(
                    callback_index = index,
                    table = %event.table_name,
                    %error,
                    "signal callback failed"
                );
            }
            let elapsed = started.elapsed();
            if elapsed > slow_threshold {
                tracing::warn!(
                    callback_index = index,
                    table = %event.table_name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "slow signal callback"
                );
            }
        }
    }

    /// Clear all callbacks
    pub fn clear_callbacks(&self) {
        if let Ok(mut callbacks) = self.callbacks.write() {
            callbacks.clear();
        }
    }

    /// Get number of registered callbacks
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().map(|c| c.len()).unwrap_or(0)
    }
}

impl Default for SignalManager {
    fn default() -> Self {
        Self::new()
    }
}
