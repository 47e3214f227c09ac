use crate::generic_store::cascade::{DependentAssociation, DependentDestroyer, DestroyContext};
use crate::traits::record_metadata::RecordMetadata;
use crate::DbPool;
use signal_system::SignalManager;
use std::sync::Arc;

/// Generic database store that provides default implementations for all
/// store operations, soft deletion included
#[derive(Clone)]
pub struct GenericStore<T: RecordMetadata> {
    pub(crate) db_pool: DbPool,
    pub(crate) signal_manager: Option<Arc<SignalManager>>,
    pub(crate) dependents: Vec<Arc<dyn DependentDestroyer>>,
    pub(crate) _phantom: std::marker::PhantomData<T>,
}

impl<T: RecordMetadata> std::fmt::Debug for GenericStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericStore")
            .field("table", &T::table_name())
            .field("has_signals", &self.has_signals())
            .field("dependent_count", &self.dependents.len())
            .finish()
    }
}

impl<T: RecordMetadata> GenericStore<T> {
    pub fn new(db_pool: DbPool, signal_manager: Option<Arc<SignalManager>>) -> Self {
        Self {
            db_pool,
            signal_manager,
            dependents: Vec::new(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Set signal manager for this store
    pub fn set_signal_manager(&mut self, signal_manager: Arc<SignalManager>) {
        self.signal_manager = Some(signal_manager);
    }

    /// Remove signal manager from this store
    pub fn remove_signal_manager(&mut self) {
        self.signal_manager = None;
    }

    /// Check if signal manager is set
    pub fn has_signals(&self) -> bool {
        self.signal_manager.is_some()
    }

    /// Register a dependent-destroy association: destroying a record of this
    /// store soft-deletes the visible children holding `foreign_key`, inside
    /// the same transaction, before this record's own row transitions.
    pub fn dependent_destroy<C>(&mut self, child_store: GenericStore<C>, foreign_key: &'static str)
    where
        C: RecordMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin + 'static,
    {
        self.dependents
            .push(Arc::new(DependentAssociation::new(child_store, foreign_key)));
    }

    /// Registered dependent associations, in registration order
    pub fn dependent_count(&self) -> usize {
        self.dependents.len()
    }

    pub(crate) async fn emit_signal(&self, event: signal_system::DatabaseEvent) {
        if let Some(signal_manager) = &self.signal_manager {
            signal_manager.emit(event).await;
        }
    }

    /// Queue an event for post-commit emission through this store's manager
    pub(crate) fn queue_event(&self, ctx: &mut DestroyContext, event: signal_system::DatabaseEvent) {
        ctx.push_event(self.signal_manager.clone(), event);
    }
}
