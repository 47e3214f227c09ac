//! Shared model fixtures for unit tests.
//!
//! Hand-written `RecordMetadata` implementations covering both marker
//! variants, counter-cached associations and optimistic locking.

use crate::id_type::UniversalId;
use crate::marker::{MarkerStrategy, MarkerValue};
use crate::record::DeletionMarks;
use crate::traits::record_metadata::{BelongsTo, RecordMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub(crate) struct Product {
    pub id: i64,
    pub title: String,
    pub comments_count: i64,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_not_deleted: Option<bool>,
}

impl RecordMetadata for Product {
    type Id = i64;

    fn table_name() -> &'static str {
        "products"
    }

    fn primary_key_field() -> &'static str {
        "id"
    }

    fn extract_id(&self) -> i64 {
        self.id
    }

    fn marker() -> MarkerStrategy {
        MarkerStrategy::ActiveFlag {
            field: "is_not_deleted",
        }
    }

    fn marker_value(&self) -> MarkerValue {
        MarkerValue::TriState(self.is_not_deleted)
    }

    fn updated_at_field() -> Option<&'static str> {
        Some("updated_at")
    }

    fn select_base_sql() -> &'static str {
        "SELECT * FROM products"
    }

    fn insert_sql() -> &'static str {
        "INSERT INTO products (title, comments_count, updated_at, deleted_at, is_not_deleted) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *"
    }

    fn update_sql() -> &'static str {
        "UPDATE products SET title = $1, comments_count = $2, updated_at = $3 WHERE id = $4"
    }

    fn bind_insert_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments> {
        sqlx::query(sql)
            .bind(&self.title)
            .bind(self.comments_count)
            .bind(self.updated_at)
            .bind(self.deleted_at)
            .bind(self.is_not_deleted)
    }

    fn bind_update_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments> {
        sqlx::query(sql)
            .bind(&self.title)
            .bind(self.comments_count)
            .bind(self.updated_at)
            .bind(self.id)
    }

    fn apply_deletion_marks(&mut self, marks: &DeletionMarks) {
        self.deleted_at = Some(marks.deleted_at);
        if let Some(updated_at) = marks.updated_at {
            self.updated_at = Some(updated_at);
        }
        self.is_not_deleted = None;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub(crate) struct Comment {
    pub id: i64,
    pub product_id: Option<i64>,
    pub body: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl RecordMetadata for Comment {
    type Id = i64;

    fn table_name() -> &'static str {
        "comments"
    }

    fn primary_key_field() -> &'static str {
        "id"
    }

    fn extract_id(&self) -> i64 {
        self.id
    }

    fn marker() -> MarkerStrategy {
        MarkerStrategy::DeletedFlag {
            field: "is_deleted",
        }
    }

    fn marker_value(&self) -> MarkerValue {
        MarkerValue::Flag(self.is_deleted)
    }

    fn belongs_to() -> &'static [BelongsTo] {
        const ASSOCIATIONS: &[BelongsTo] = &[BelongsTo {
            name: "product",
            foreign_key: "product_id",
            target_table: "products",
            target_primary_key: "id",
            counter_cache: Some("comments_count"),
        }];
        ASSOCIATIONS
    }

    fn foreign_key_value(&self, foreign_key: &'static str) -> Option<UniversalId> {
        match foreign_key {
            "product_id" => self.product_id.map(UniversalId::from),
            _ => None,
        }
    }

    fn select_base_sql() -> &'static str {
        "SELECT * FROM comments"
    }

    fn insert_sql() -> &'static str {
        "INSERT INTO comments (product_id, body, deleted_at, is_deleted) \
         VALUES ($1, $2, $3, $4) RETURNING *"
    }

    fn update_sql() -> &'static str {
        "UPDATE comments SET product_id = $1, body = $2 WHERE id = $3"
    }

    fn bind_insert_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments> {
        sqlx::query(sql)
            .bind(self.product_id)
            .bind(&self.body)
            .bind(self.deleted_at)
            .bind(self.is_deleted)
    }

    fn bind_update_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments> {
        sqlx::query(sql)
            .bind(self.product_id)
            .bind(&self.body)
            .bind(self.id)
    }

    fn apply_deletion_marks(&mut self, marks: &DeletionMarks) {
        self.deleted_at = Some(marks.deleted_at);
        self.is_deleted = true;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub(crate) struct LockedInvoice {
    pub id: i64,
    pub amount_cents: i64,
    pub lock_version: i64,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl RecordMetadata for LockedInvoice {
    type Id = i64;

    fn table_name() -> &'static str {
        "invoices"
    }

    fn primary_key_field() -> &'static str {
        "id"
    }

    fn extract_id(&self) -> i64 {
        self.id
    }

    fn marker() -> MarkerStrategy {
        MarkerStrategy::DeletedFlag {
            field: "is_deleted",
        }
    }

    fn marker_value(&self) -> MarkerValue {
        MarkerValue::Flag(self.is_deleted)
    }

    fn lock_field() -> Option<&'static str> {
        Some("lock_version")
    }

    fn lock_version(&self) -> Option<i64> {
        Some(self.lock_version)
    }

    fn select_base_sql() -> &'static str {
        "SELECT * FROM invoices"
    }

    fn insert_sql() -> &'static str {
        "INSERT INTO invoices (amount_cents, lock_version, deleted_at, is_deleted) \
         VALUES ($1, $2, $3, $4) RETURNING *"
    }

    fn update_sql() -> &'static str {
        "UPDATE invoices SET amount_cents = $1 WHERE id = $2"
    }

    fn bind_insert_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments> {
        sqlx::query(sql)
            .bind(self.amount_cents)
            .bind(self.lock_version)
            .bind(self.deleted_at)
            .bind(self.is_deleted)
    }

    fn bind_update_params<'a>(
        &'a self,
        sql: &'a str,
    ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments> {
        sqlx::query(sql).bind(self.amount_cents).bind(self.id)
    }

    fn apply_deletion_marks(&mut self, marks: &DeletionMarks) {
        self.deleted_at = Some(marks.deleted_at);
        self.is_deleted = true;
    }
}

pub(crate) fn active_product(id: i64) -> Product {
    Product {
        id,
        title: "widget".to_string(),
        comments_count: 0,
        updated_at: None,
        deleted_at: None,
        is_not_deleted: Some(true),
    }
}
