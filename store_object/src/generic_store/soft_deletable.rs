//! Generic store implementations
//!
//! The soft-deletion state machine. A destroy stages the deletion marks,
//! cascades to dependents, issues one conditional update restricted to the
//! still-visible row, maintains counter caches, applies the marks to the
//! in-memory record and queues exactly one post-destroy event.

use super::cascade::DestroyContext;
use super::core::GenericStore;
use super::store_object::bind_json_param;
use crate::errors::SofthausError;
use crate::id_type::{bind_universal_id, HasUniversalId};
use crate::query_builder::UpdateSet;
use crate::record::{DeletionMarks, TrackedRecord};
use crate::traits::record_metadata::{BelongsTo, RecordMetadata};
use crate::traits::SoftDeletable;
use crate::validation::ValidatedFieldName;
use async_trait::async_trait;
use chrono::Utc;
use signal_system::{record_snapshot, EventType, RECORD_PAYLOAD_KEY};
use sqlx::{FromRow, Postgres, Row, Transaction};

/// Conditional soft-delete UPDATE for a record type.
///
/// Bind order: deleted_at [, updated_at], primary key [, lock version].
/// The not-deleted predicate keeps concurrent destroys from both matching;
/// the optional lock predicate turns a lost race into a stale-record error.
pub(crate) fn destroy_sql<T: RecordMetadata>() -> String {
    let marker = T::marker();
    let mut sql = format!(
        "UPDATE {} SET {} = $1",
        T::table_name(),
        T::deleted_at_field()
    );
    let mut param = 2;
    if let Some(updated_at) = T::updated_at_field() {
        sql.push_str(&format!(", {} = ${}", updated_at, param));
        param += 1;
    }
    sql.push_str(", ");
    sql.push_str(&marker.delete_assignment_sql());
    sql.push_str(&format!(" WHERE {} = ${}", T::primary_key_field(), param));
    param += 1;
    if let Some(lock) = T::lock_field() {
        sql.push_str(&format!(" AND {} = ${}", lock, param));
    }
    sql.push_str(" AND ");
    sql.push_str(&marker.not_deleted_sql());
    sql
}

/// Associations whose counter caches this destroy must decrement.
///
/// The association that triggered the destroy as part of a cascade is
/// skipped: its owner is going away in the same transaction and already
/// accounts for the child.
pub(crate) fn counter_targets(
    associations: &'static [BelongsTo],
    destroyed_by: Option<&'static str>,
) -> Vec<&'static BelongsTo> {
    associations
        .iter()
        .filter(|assoc| assoc.counter_cache.is_some() && destroyed_by != Some(assoc.foreign_key))
        .collect()
}

pub(crate) fn decrement_counter_sql(assoc: &BelongsTo, counter: &str) -> String {
    format!(
        "UPDATE {} SET {} = {} - 1 WHERE {} = $1",
        assoc.target_table, counter, counter, assoc.target_primary_key
    )
}

impl<T> GenericStore<T>
where
    T: RecordMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin + 'static,
{
    /// Soft-delete inside an ambient transaction, with cascade provenance.
    ///
    /// `destroyed_by` names the foreign key of the association that
    /// triggered this destroy when it runs as part of a parent's cascade.
    pub(crate) async fn destroy_in_with(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &mut TrackedRecord<T>,
        destroyed_by: Option<&'static str>,
        ctx: &mut DestroyContext,
    ) -> Result<u64, SofthausError> {
        if record.is_frozen() {
            return Err(SofthausError::frozen(
                T::table_name(),
                record.id().universal_id(),
            ));
        }
        if !record.is_deletable() {
            return Ok(0);
        }

        let marks = DeletionMarks::compute::<T>(Utc::now());
        record.stage(marks.clone());
        let result = self
            .run_destroy(tx, record, &marks, destroyed_by, ctx)
            .await;
        // Staged marks never outlive the call, success or error
        record.clear_staged();
        result
    }

    async fn run_destroy(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &mut TrackedRecord<T>,
        marks: &DeletionMarks,
        destroyed_by: Option<&'static str>,
        ctx: &mut DestroyContext,
    ) -> Result<u64, SofthausError> {
        let id = record.id();
        let owner_id = id.universal_id();

        // Dependents transition first, inside this same transaction
        for dependent in &self.dependents {
            dependent.destroy_dependents(tx, &owner_id, ctx).await?;
        }

        let sql = destroy_sql::<T>();
        tracing::debug!(table = T::table_name(), sql = %sql, "destroy");

        let mut query = sqlx::query(&sql).bind(marks.deleted_at);
        if let Some(updated_at) = marks.updated_at {
            query = query.bind(updated_at);
        }
        query = query.bind(&id);
        if T::lock_field().is_some() {
            let version = record.model().lock_version().ok_or_else(|| {
                SofthausError::validation(
                    T::table_name(),
                    "lock_version",
                    "lock_field is declared but lock_version() returned None",
                )
            })?;
            query = query.bind(version);
        }

        let affected = query
            .execute(tx.as_mut())
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "destroy", e))?
            .rows_affected();

        if T::lock_field().is_some() && affected != 1 {
            return Err(SofthausError::stale_record(T::table_name(), &owner_id));
        }

        if affected > 0 {
            for assoc in counter_targets(T::belongs_to(), destroyed_by) {
                let Some(counter) = assoc.counter_cache else {
                    continue;
                };
                let Some(parent_id) = record.model().foreign_key_value(assoc.foreign_key) else {
                    continue;
                };
                let sql = decrement_counter_sql(assoc, counter);
                let query = sqlx::query(&sql);
                bind_universal_id!(query, &parent_id)
                    .execute(tx.as_mut())
                    .await
                    .map_err(|e| {
                        SofthausError::database_operation(
                            assoc.target_table,
                            "decrement_counter",
                            e,
                        )
                    })?;
            }

            // Event carries the pre-transition shape; build it before the
            // marks land on the model
            let mut event = self.build_event(EventType::Destroy, record.model());
            event.add_payload(
                RECORD_PAYLOAD_KEY.to_string(),
                record_snapshot(record.model()),
            );
            record.commit_destroy();
            self.queue_event(ctx, event);
        }

        Ok(affected)
    }
}

#[async_trait]
impl<T> SoftDeletable for GenericStore<T>
where
    T: RecordMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin + 'static,
{
    async fn destroy(&self, record: &mut TrackedRecord<T>) -> Result<u64, SofthausError> {
        if !record.is_deletable() {
            return Ok(0);
        }

        let mut tx = self
            .db_pool
            .begin()
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "destroy", e))?;
        let mut ctx = DestroyContext::new();

        let affected = self.destroy_in_with(&mut tx, record, None, &mut ctx).await?;

        tx.commit()
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "destroy", e))?;
        ctx.flush().await;

        Ok(affected)
    }

    async fn destroy_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &mut TrackedRecord<T>,
        ctx: &mut DestroyContext,
    ) -> Result<u64, SofthausError> {
        self.destroy_in_with(tx, record, None, ctx).await
    }

    async fn save(&self, record: &mut TrackedRecord<T>) -> Result<u64, SofthausError> {
        if record.is_frozen() {
            return Err(SofthausError::frozen(
                T::table_name(),
                record.id().universal_id(),
            ));
        }

        let sql = format!(
            "{} AND {} RETURNING *",
            T::update_sql(),
            T::marker().not_deleted_sql()
        );
        let row = record
            .model()
            .bind_update_params(&sql)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "save", e))?;

        match row {
            Some(row) => {
                let updated = T::from_row(&row)
                    .map_err(|e| SofthausError::database_operation(T::table_name(), "save", e))?;
                record.replace_model(updated);
                if self.has_signals() {
                    let event = self.build_event(EventType::Update, record.model());
                    self.emit_signal(event).await;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn save_ignoring_soft_deletion(
        &self,
        record: &mut TrackedRecord<T>,
    ) -> Result<u64, SofthausError> {
        if record.is_frozen() {
            return Err(SofthausError::frozen(
                T::table_name(),
                record.id().universal_id(),
            ));
        }

        let sql = format!("{} RETURNING *", T::update_sql());
        let row = {
            let (model, _bypass) = record.enter_bypass();
            model
                .bind_update_params(&sql)
                .fetch_optional(&self.db_pool)
                .await
            // _bypass drops here: the flag never survives the call
        }
        .map_err(|e| {
            SofthausError::database_operation(T::table_name(), "save_ignoring_soft_deletion", e)
        })?;

        match row {
            Some(row) => {
                let updated = T::from_row(&row).map_err(|e| {
                    SofthausError::database_operation(
                        T::table_name(),
                        "save_ignoring_soft_deletion",
                        e,
                    )
                })?;
                record.replace_model(updated);
                if self.has_signals() {
                    let event = self.build_event(EventType::Update, record.model());
                    self.emit_signal(event).await;
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_columns_ignoring_soft_deletion(
        &self,
        record: &mut TrackedRecord<T>,
        set: UpdateSet,
    ) -> Result<u64, SofthausError> {
        if record.is_frozen() {
            return Err(SofthausError::frozen(
                T::table_name(),
                record.id().universal_id(),
            ));
        }
        if set.is_empty() {
            return Ok(0);
        }

        for field in set.operations.keys() {
            ValidatedFieldName::new(field)
                .map_err(|e| SofthausError::validation(T::table_name(), field, &e.to_string()))?;
        }

        let (set_clause, values) = set.to_sql(1);
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING *",
            T::table_name(),
            set_clause,
            T::primary_key_field(),
            values.len() + 1
        );
        let id = record.id();

        let row = {
            let (_model, _bypass) = record.enter_bypass();
            let mut query = sqlx::query(&sql);
            for value in values {
                query = bind_json_param!(query, value);
            }
            query = query.bind(&id);
            query.fetch_optional(&self.db_pool).await
        }
        .map_err(|e| {
            SofthausError::database_operation(
                T::table_name(),
                "update_columns_ignoring_soft_deletion",
                e,
            )
        })?;

        match row {
            Some(row) => {
                let updated = T::from_row(&row).map_err(|e| {
                    SofthausError::database_operation(
                        T::table_name(),
                        "update_columns_ignoring_soft_deletion",
                        e,
                    )
                })?;
                // column writes skip callbacks, so no event here
                record.replace_model(updated);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn reload(&self, record: &mut TrackedRecord<T>) -> Result<(), SofthausError> {
        // The cached flag resets before the read so the outcome reflects the
        // row as it is now, not as this instance last saw it
        record.reset_destroyed();

        let sql = format!(
            "{} WHERE {} = $1",
            T::select_base_sql(),
            T::primary_key_field()
        );
        let id = record.id();
        let found = sqlx::query_as::<_, T>(&sql)
            .bind(&id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "reload", e))?;

        match found {
            Some(model) => {
                record.replace_model(model);
                Ok(())
            }
            None => Err(SofthausError::not_found(
                T::table_name(),
                id.universal_id(),
            )),
        }
    }

    async fn list_deleted(&self) -> Result<Vec<T>, SofthausError> {
        let sql = format!(
            "{} WHERE {}",
            T::select_base_sql(),
            T::marker().deleted_sql()
        );
        let results = sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "list_deleted", e))?;
        Ok(results)
    }

    async fn count_deleted(&self) -> Result<i64, SofthausError> {
        let sql = format!(
            "SELECT COUNT(*) AS total FROM {} WHERE {}",
            T::table_name(),
            T::marker().deleted_sql()
        );
        let result = sqlx::query(&sql)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "count_deleted", e))?;

        let total: i64 = result.get("total");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Comment, LockedInvoice, Product};

    #[test]
    fn destroy_sql_without_locking_targets_visible_rows_only() {
        let sql = destroy_sql::<Product>();
        assert_eq!(
            sql,
            "UPDATE products SET deleted_at = $1, updated_at = $2, is_not_deleted = NULL \
             WHERE id = $3 AND is_not_deleted IS TRUE"
        );
    }

    #[test]
    fn destroy_sql_with_locking_conditions_on_the_version() {
        let sql = destroy_sql::<LockedInvoice>();
        assert_eq!(
            sql,
            "UPDATE invoices SET deleted_at = $1, is_deleted = TRUE \
             WHERE id = $2 AND lock_version = $3 AND is_deleted = FALSE"
        );
    }

    #[test]
    fn destroy_sql_marker_assignment_follows_the_variant() {
        let sql = destroy_sql::<Comment>();
        assert!(sql.contains("is_deleted = TRUE"));
        assert!(sql.ends_with("AND is_deleted = FALSE"));
    }

    #[test]
    fn counter_targets_skip_the_cascading_association() {
        let all = counter_targets(Comment::belongs_to(), None);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].foreign_key, "product_id");

        // A destroy cascading from products must not decrement the
        // products counter again
        let cascaded = counter_targets(Comment::belongs_to(), Some("product_id"));
        assert!(cascaded.is_empty());
    }

    #[test]
    fn counter_targets_ignore_associations_without_counters() {
        let targets = counter_targets(Product::belongs_to(), None);
        assert!(targets.is_empty());
    }

    #[test]
    fn decrement_counter_sql_touches_one_owner_row() {
        let assoc = &Comment::belongs_to()[0];
        let sql = decrement_counter_sql(assoc, "comments_count");
        assert_eq!(
            sql,
            "UPDATE products SET comments_count = comments_count - 1 WHERE id = $1"
        );
    }
}
