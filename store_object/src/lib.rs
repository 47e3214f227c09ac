//! Store Object - Core persistence abstraction for SoftHaus
//!
//! This crate provides the soft-deletion overlay and the store types it
//! runs on: record metadata traits, marker strategies, tracked records,
//! visibility-aware query building and the generic store implementation.

pub mod errors;
pub mod generic_store;
pub mod id_type;
pub mod marker;
pub mod prelude;
pub mod query_builder;
pub mod record;
pub mod traits;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::SofthausError;
pub use generic_store::{
    DependentAssociation, DependentDestroyer, DestroyContext, GenericStore,
    GenericStoreTransaction,
};
pub use id_type::{HasUniversalId, UniversalId};
pub use marker::{MarkerStrategy, MarkerValue, Visibility};
pub use query_builder::{QueryBuilder, QueryFilter, QueryOperator, SortOrder, UpdateSet};
pub use record::{DeletionMarks, TrackedRecord};
pub use traits::record_metadata::BelongsTo;
pub use traits::{RecordMetadata, SoftDeletable, StoreObject};
pub use validation::{ValidatedFieldName, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
