//! Convenience re-exports for common store-object usage

pub use crate::errors::SofthausError;
pub use crate::generic_store::{
    DependentAssociation, DependentDestroyer, DestroyContext, GenericStore,
    GenericStoreTransaction,
};
pub use crate::id_type::{HasUniversalId, UniversalId};
pub use crate::marker::{MarkerStrategy, MarkerValue, Visibility};
pub use crate::query_builder::{QueryBuilder, QueryFilter, QueryOperator, SortOrder, UpdateSet};
pub use crate::record::{DeletionMarks, TrackedRecord};
pub use crate::traits::record_metadata::BelongsTo;
pub use crate::traits::{RecordMetadata, SoftDeletable, StoreObject};
pub use crate::validation::{ValidatedFieldName, ValidationError};
pub use crate::DbPool;
