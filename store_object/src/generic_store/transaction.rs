//! Transaction support for GenericStore
//!
//! Destroy flows that span several records (a child, then its parent) run
//! inside one ambient transaction owned by the caller. This module provides
//! the wrapper that owns it.

use super::GenericStore;
use crate::errors::SofthausError;
use crate::traits::record_metadata::RecordMetadata;
use sqlx::{Postgres, Transaction};
use std::marker::PhantomData;

/// A transactional context for GenericStore operations
///
/// This struct wraps a sqlx transaction and provides commit/rollback
/// functionality. The underlying transaction can be accessed via `as_mut()`
/// for executing queries.
///
/// # Example
/// ```ignore
/// let mut tx = store.begin_transaction().await?;
/// let mut ctx = DestroyContext::new();
///
/// comment_store.destroy_in(tx.as_mut(), &mut comment, &mut ctx).await?;
/// product_store.destroy_in(tx.as_mut(), &mut product, &mut ctx).await?;
///
/// tx.commit().await?;
/// ctx.flush().await;
/// ```
pub struct GenericStoreTransaction<'a, T: RecordMetadata> {
    tx: Transaction<'a, Postgres>,
    _phantom: PhantomData<T>,
}

impl<T: RecordMetadata> GenericStore<T> {
    /// Begin a new database transaction
    pub async fn begin_transaction(&self) -> Result<GenericStoreTransaction<'_, T>, SofthausError> {
        let tx = self.db_pool.begin().await.map_err(|e| {
            SofthausError::DatabaseError(format!("Failed to begin transaction: {}", e))
        })?;
        Ok(GenericStoreTransaction {
            tx,
            _phantom: PhantomData,
        })
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &sqlx::PgPool {
        &self.db_pool
    }
}

impl<'a, T: RecordMetadata> GenericStoreTransaction<'a, T> {
    /// Commit the transaction
    pub async fn commit(self) -> Result<(), SofthausError> {
        self.tx.commit().await.map_err(|e| {
            SofthausError::DatabaseError(format!("Failed to commit transaction: {}", e))
        })?;
        Ok(())
    }

    /// Rollback the transaction
    pub async fn rollback(self) -> Result<(), SofthausError> {
        self.tx.rollback().await.map_err(|e| {
            SofthausError::DatabaseError(format!("Failed to rollback transaction: {}", e))
        })?;
        Ok(())
    }

    /// Get a mutable reference to the underlying transaction
    /// Use this to execute queries within the transaction
    pub fn as_mut(&mut self) -> &mut Transaction<'a, Postgres> {
        &mut self.tx
    }
}
