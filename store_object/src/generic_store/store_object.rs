//! Generic store implementations
//!
//! Scoped CRUD for any `RecordMetadata` type. Every read composes the
//! record type's marker predicate, so deleted rows are invisible unless a
//! query explicitly asks for them.

use super::core::GenericStore;
use crate::errors::SofthausError;
use crate::id_type::HasUniversalId;
use crate::traits::record_metadata::RecordMetadata;
use crate::traits::StoreObject;
use async_trait::async_trait;
use sqlx::{FromRow, Row};

// Macro for the shared parameter binding logic
macro_rules! bind_json_param {
    ($query:expr, $param:expr) => {
        match $param {
            serde_json::Value::String(s) => {
                // Try to parse as RFC3339 timestamp first
                if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                    $query.bind(dt.with_timezone(&chrono::Utc))
                // Try to parse as UUID
                } else if let Ok(uuid) = uuid::Uuid::parse_str(&s) {
                    $query.bind(uuid)
                } else {
                    $query.bind(s)
                }
            },
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            serde_json::Value::Bool(b) => $query.bind(b),
            serde_json::Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(other.to_string()),
        }
    };
}
pub(crate) use bind_json_param;

#[async_trait]
impl<T> StoreObject for GenericStore<T>
where
    T: RecordMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin + 'static,
{
    type Model = T;
    type Id = T::Id;

    async fn create(&self, data: Self::Model) -> Result<Self::Model, SofthausError> {
        let row = data
            .bind_insert_params(T::insert_sql())
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "create", e))?;
        let created = T::from_row(&row)
            .map_err(|e| SofthausError::database_operation(T::table_name(), "create", e))?;

        if self.has_signals() {
            let event = self.build_event(signal_system::EventType::Create, &created);
            self.emit_signal(event).await;
        }

        Ok(created)
    }

    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<Self::Model>, SofthausError> {
        let sql = format!(
            "{} WHERE {} = $1 AND {}",
            T::select_base_sql(),
            T::primary_key_field(),
            T::marker().not_deleted_sql()
        );

        let result = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "get_by_id", e))?;

        Ok(result)
    }

    async fn list_all(&self) -> Result<Vec<Self::Model>, SofthausError> {
        let sql = format!(
            "{} WHERE {}",
            T::select_base_sql(),
            T::marker().not_deleted_sql()
        );
        let results = sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "list_all", e))?;
        Ok(results)
    }

    async fn count(&self) -> Result<i64, SofthausError> {
        let sql = format!(
            "SELECT COUNT(*) AS total FROM {} WHERE {}",
            T::table_name(),
            T::marker().not_deleted_sql()
        );
        let result = sqlx::query(&sql)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "count", e))?;

        let total: i64 = result.get("total");
        Ok(total)
    }

    async fn find(&self, query: crate::QueryBuilder) -> Result<Vec<Self::Model>, SofthausError> {
        let (where_clause, order_clause, limit_clause, params) =
            query.build_scoped(&T::marker());

        // Avoid format! allocation by building string directly
        let base_sql = T::select_base_sql();
        let mut full_sql = String::with_capacity(
            base_sql.len() + where_clause.len() + order_clause.len() + limit_clause.len() + 3,
        );
        full_sql.push_str(base_sql);
        if !where_clause.is_empty() {
            full_sql.push(' ');
            full_sql.push_str(&where_clause);
        }
        if !order_clause.is_empty() {
            full_sql.push(' ');
            full_sql.push_str(&order_clause);
        }
        if !limit_clause.is_empty() {
            full_sql.push(' ');
            full_sql.push_str(&limit_clause);
        }

        tracing::debug!(table = T::table_name(), sql = %full_sql, "find");

        let mut sqlx_query = sqlx::query_as::<_, T>(&full_sql);
        for param in params {
            sqlx_query = bind_json_param!(sqlx_query, param);
        }

        let results = sqlx_query
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "find", e))?;

        Ok(results)
    }

    async fn find_one(
        &self,
        query: crate::QueryBuilder,
    ) -> Result<Option<Self::Model>, SofthausError> {
        let query_with_limit = query.limit(1);
        let mut results = self.find(query_with_limit).await?;

        Ok(results.pop())
    }

    async fn count_where(&self, query: crate::QueryBuilder) -> Result<i64, SofthausError> {
        let (where_clause, _, _, params) = query.build_scoped(&T::marker());

        let mut sql = format!("SELECT COUNT(*) AS total FROM {}", T::table_name());
        if !where_clause.is_empty() {
            sql.push(' ');
            sql.push_str(&where_clause);
        }

        let mut sqlx_query = sqlx::query(&sql);
        for param in params {
            sqlx_query = bind_json_param!(sqlx_query, param);
        }

        let result = sqlx_query
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| SofthausError::database_operation(T::table_name(), "count_where", e))?;

        let total: i64 = result.get("total");
        Ok(total)
    }
}

// Event construction shared by the CRUD and soft-delete paths
impl<T> GenericStore<T>
where
    T: RecordMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin + 'static,
{
    pub(crate) fn build_event(
        &self,
        event_type: signal_system::EventType,
        record: &T,
    ) -> signal_system::DatabaseEvent {
        let mut event =
            signal_system::DatabaseEvent::new(event_type, T::table_name().to_string())
                .with_record_id(record.extract_id().universal_id().to_string_fast());
        for (key, value) in signal_system::serialize_record_payload(record) {
            event.add_payload(key, value);
        }
        event
    }
}
