//! Dependent-destroy cascades
//!
//! A parent store registers one `DependentDestroyer` per dependent
//! association. During a destroy, each destroyer soft-deletes the visible
//! children inside the parent's transaction before the parent row
//! transitions, passing the triggering foreign key down so the children's
//! counter-cache maintenance skips the association that is already going
//! away.

use crate::errors::SofthausError;
use crate::generic_store::core::GenericStore;
use crate::id_type::{bind_universal_id, UniversalId};
use crate::record::TrackedRecord;
use crate::traits::record_metadata::RecordMetadata;
use async_trait::async_trait;
use signal_system::{DatabaseEvent, SignalManager};
use sqlx::{Postgres, Transaction};
use std::sync::Arc;

/// A post-destroy event waiting for its transaction to commit
struct PendingEvent {
    manager: Arc<SignalManager>,
    event: DatabaseEvent,
}

impl std::fmt::Debug for PendingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingEvent")
            .field("table", &self.event.table_name)
            .finish()
    }
}

/// Buffered post-destroy notifications for one logical destroy flow.
///
/// Events queue up while the transaction is open and are emitted by
/// [`DestroyContext::flush`] after it commits, so every successful logical
/// deletion notifies exactly once and a rolled-back transaction notifies
/// nobody.
#[derive(Debug, Default)]
pub struct DestroyContext {
    pending: Vec<PendingEvent>,
}

impl DestroyContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_event(
        &mut self,
        manager: Option<Arc<SignalManager>>,
        event: DatabaseEvent,
    ) {
        if let Some(manager) = manager {
            self.pending.push(PendingEvent { manager, event });
        }
    }

    /// Number of events waiting for the commit
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Emit every queued event, in destroy order, through the store that
    /// queued it. Call after the ambient transaction commits.
    pub async fn flush(&mut self) {
        for pending in self.pending.drain(..) {
            pending.manager.emit(pending.event).await;
        }
    }
}

/// Destroys the visible children of an owner row inside the owner's
/// transaction
#[async_trait]
pub trait DependentDestroyer: Send + Sync {
    /// Foreign-key column the children hold on the owner
    fn foreign_key(&self) -> &'static str;

    async fn destroy_dependents(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_id: &UniversalId,
        ctx: &mut DestroyContext,
    ) -> Result<u64, SofthausError>;
}

/// A dependent-destroy association bound to the child's store
pub struct DependentAssociation<C: RecordMetadata> {
    store: GenericStore<C>,
    foreign_key: &'static str,
}

impl<C: RecordMetadata> DependentAssociation<C> {
    pub fn new(store: GenericStore<C>, foreign_key: &'static str) -> Self {
        Self { store, foreign_key }
    }
}

#[async_trait]
impl<C> DependentDestroyer for DependentAssociation<C>
where
    C: RecordMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin + 'static,
{
    fn foreign_key(&self) -> &'static str {
        self.foreign_key
    }

    async fn destroy_dependents(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_id: &UniversalId,
        ctx: &mut DestroyContext,
    ) -> Result<u64, SofthausError> {
        let sql = format!(
            "{} WHERE {} = $1 AND {}",
            C::select_base_sql(),
            self.foreign_key,
            C::marker().not_deleted_sql()
        );
        let query = sqlx::query_as::<_, C>(&sql);
        let children = bind_universal_id!(query, owner_id)
            .fetch_all(tx.as_mut())
            .await
            .map_err(|e| {
                SofthausError::database_operation(C::table_name(), "destroy_dependents", e)
            })?;

        let mut destroyed = 0u64;
        for child in children {
            let mut tracked = TrackedRecord::new(child);
            destroyed += self
                .store
                .destroy_in_with(tx, &mut tracked, Some(self.foreign_key), ctx)
                .await?;
        }
        Ok(destroyed)
    }
}
