//! Trait definitions
//!
//! The soft-deletion capability. A store implementing this trait converts
//! logical deletes into marker-column transitions while keeping the external
//! contract of a real delete: post-destroy signals fire exactly once,
//! default reads exclude deleted rows, counter caches stay correct, and the
//! conditional update respects optimistic locking.

use crate::generic_store::DestroyContext;
use crate::query_builder::UpdateSet;
use crate::record::TrackedRecord;
use crate::traits::record_metadata::RecordMetadata;
use crate::SofthausError;
use async_trait::async_trait;

use super::core::StoreObject;

#[async_trait]
pub trait SoftDeletable: StoreObject
where
    Self::Model: RecordMetadata,
{
    /// True iff the record has not been marked deleted yet. Pure.
    fn is_deletable(record: &TrackedRecord<Self::Model>) -> bool {
        record.is_deletable()
    }

    /// Soft-delete a record.
    ///
    /// Opens one transaction covering dependent cascades, the conditional
    /// update and counter-cache maintenance, then emits the queued
    /// post-destroy events. Destroying an already-deleted record returns
    /// Ok(0); a lost race returns Ok(0) without locking and
    /// [`SofthausError::StaleRecord`] with it.
    async fn destroy(
        &self,
        record: &mut TrackedRecord<Self::Model>,
    ) -> Result<u64, SofthausError>;

    /// Soft-delete inside an ambient transaction owned by the caller.
    ///
    /// Post-destroy events are queued into `ctx`; flush them with
    /// [`DestroyContext::flush`] after committing.
    async fn destroy_in(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        record: &mut TrackedRecord<Self::Model>,
        ctx: &mut DestroyContext,
    ) -> Result<u64, SofthausError>;

    /// Persist the in-memory model with the default scope applied.
    /// Returns 0 when the row is deleted (or gone) and was left untouched.
    async fn save(&self, record: &mut TrackedRecord<Self::Model>) -> Result<u64, SofthausError>;

    /// Persist the in-memory model without the visibility scope, reporting
    /// the literal persisted-destroyed state for the duration of the call
    async fn save_ignoring_soft_deletion(
        &self,
        record: &mut TrackedRecord<Self::Model>,
    ) -> Result<u64, SofthausError>;

    /// Write individual columns without the visibility scope; the in-memory
    /// model is refreshed from the returned row
    async fn update_columns_ignoring_soft_deletion(
        &self,
        record: &mut TrackedRecord<Self::Model>,
        set: UpdateSet,
    ) -> Result<u64, SofthausError>;

    /// Re-read the row unscoped, resetting the cached destroyed flag first
    async fn reload(&self, record: &mut TrackedRecord<Self::Model>) -> Result<(), SofthausError>;

    /// List only deleted objects
    async fn list_deleted(&self) -> Result<Vec<Self::Model>, SofthausError>;

    /// Count deleted objects
    async fn count_deleted(&self) -> Result<i64, SofthausError>;
}
