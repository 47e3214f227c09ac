//! Trait definitions
//!
//! This module defines the read/write surface shared by all stores.
//! Every read applies the record type's default visibility scope unless the
//! query explicitly asks otherwise.

use crate::SofthausError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait that defines common database operations for all entities
#[async_trait]
pub trait StoreObject: Clone + Send + Sync + Debug {
    /// The model type that this object represents
    type Model: Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>;

    /// The ID type used for this object (UUID, i64, String, etc.)
    type Id: Clone + Send + Sync + Debug;

    /// Create a new instance of this object
    async fn create(&self, data: Self::Model) -> Result<Self::Model, SofthausError>;

    /// Get a visible object by its ID
    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<Self::Model>, SofthausError>;

    /// List all visible objects of this type
    async fn list_all(&self) -> Result<Vec<Self::Model>, SofthausError>;

    /// Count visible objects of this type
    async fn count(&self) -> Result<i64, SofthausError>;

    /// Find records matching query conditions
    async fn find(&self, query: crate::QueryBuilder) -> Result<Vec<Self::Model>, SofthausError>;

    /// Find first record matching query conditions
    async fn find_one(
        &self,
        query: crate::QueryBuilder,
    ) -> Result<Option<Self::Model>, SofthausError>;

    /// Count records matching query conditions
    async fn count_where(&self, query: crate::QueryBuilder) -> Result<i64, SofthausError>;
}
