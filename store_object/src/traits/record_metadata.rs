//! Trait definitions
//!
//! This module defines the metadata contract a record type must provide to
//! participate in the soft-deletion overlay. Implementations are written by
//! hand per model and fixed at definition time; the store resolves
//! everything statically.

use crate::id_type::{HasUniversalId, UniversalId};
use crate::marker::{MarkerStrategy, MarkerValue};
use crate::record::DeletionMarks;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A belongs-to association of a record type.
///
/// `counter_cache` names the column on the owning side that mirrors the
/// number of visible children; the overlay decrements it when a child is
/// destroyed outside the owner's own cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BelongsTo {
    /// Association name, used in logs
    pub name: &'static str,
    /// Foreign-key column on this record's table
    pub foreign_key: &'static str,
    /// Owning side's table
    pub target_table: &'static str,
    /// Owning side's primary-key column
    pub target_primary_key: &'static str,
    /// Counter-cache column on the owning side, when maintained
    pub counter_cache: Option<&'static str>,
}

/// Metadata about a record type's table, marker strategy and associations.
///
/// ```ignore
/// impl RecordMetadata for Product {
///     type Id = i64;
///
///     fn table_name() -> &'static str { "products" }
///     fn primary_key_field() -> &'static str { "id" }
///     fn extract_id(&self) -> i64 { self.id }
///
///     fn marker() -> MarkerStrategy {
///         MarkerStrategy::ActiveFlag { field: "is_not_deleted" }
///     }
///     fn marker_value(&self) -> MarkerValue {
///         MarkerValue::TriState(self.is_not_deleted)
///     }
///     // ...
/// }
/// ```
pub trait RecordMetadata:
    Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// The type used for the primary key
    type Id: Clone
        + Send
        + Sync
        + Debug
        + Unpin
        + HasUniversalId
        + for<'q> sqlx::Encode<'q, sqlx::Postgres>
        + for<'r> sqlx::Decode<'r, sqlx::Postgres>
        + sqlx::Type<sqlx::Postgres>;

    /// The table name in the database
    fn table_name() -> &'static str;

    /// The primary key column
    fn primary_key_field() -> &'static str;

    /// Extract ID from model instance
    fn extract_id(&self) -> Self::Id;

    /// Marker variant for this type; chosen at definition time, immutable
    fn marker() -> MarkerStrategy;

    /// Current value of the marker column on this instance
    fn marker_value(&self) -> MarkerValue;

    /// Column populated with the transition timestamp
    fn deleted_at_field() -> &'static str {
        "deleted_at"
    }

    /// Column refreshed on every state-mutating operation, when tracked
    fn updated_at_field() -> Option<&'static str> {
        None
    }

    /// Optimistic-locking column, when the table versions rows
    fn lock_field() -> Option<&'static str> {
        None
    }

    /// Last-read lock version; must be Some whenever lock_field is declared
    fn lock_version(&self) -> Option<i64> {
        None
    }

    /// Belongs-to associations of this record type
    fn belongs_to() -> &'static [BelongsTo] {
        &[]
    }

    /// Current value of one of the belongs_to foreign keys, None when unset
    fn foreign_key_value(&self, foreign_key: &'static str) -> Option<UniversalId> {
        let _ = foreign_key;
        None
    }

    /// SQL for SELECT base operation, e.g. `SELECT * FROM products`.
    /// The store appends WHERE clauses; never include one here.
    fn select_base_sql() -> &'static str;

    /// SQL for INSERT with `$n` placeholders, ending in `RETURNING *`
    fn insert_sql() -> &'static str;

    /// SQL for a full-row UPDATE with `$n` placeholders, ending in
    /// `WHERE <pk> = $n` and nothing after it; the store appends the
    /// visibility predicate and RETURNING clause
    fn update_sql() -> &'static str;

    /// Bind INSERT parameters in the order [`Self::insert_sql`] expects
    fn bind_insert_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments>;

    /// Bind UPDATE parameters (set values, then the primary key) in the
    /// order [`Self::update_sql`] expects
    fn bind_update_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments>;

    /// Apply a committed soft-delete transition to the in-memory instance:
    /// the deletion timestamp, updated_at when tracked, and the marker column
    fn apply_deletion_marks(&mut self, marks: &DeletionMarks);
}
