//! # SoftHaus
//!
//! A soft-deletion overlay for PostgreSQL persistence layers. A logical
//! delete becomes a reversible marker-column transition instead of a row
//! removal, while keeping the external contract of a real delete:
//! post-destroy signals fire exactly once, default reads exclude deleted
//! rows, counter caches on owning associations stay correct, and the
//! conditional update respects optimistic locking.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use softhaus::prelude::*;
//! use chrono::{DateTime, Utc};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
//! pub struct Product {
//!     pub id: i64,
//!     pub title: String,
//!     pub deleted_at: Option<DateTime<Utc>>,
//!     pub is_not_deleted: Option<bool>,
//! }
//!
//! impl RecordMetadata for Product {
//!     type Id = i64;
//!
//!     fn table_name() -> &'static str { "products" }
//!     fn primary_key_field() -> &'static str { "id" }
//!     fn extract_id(&self) -> i64 { self.id }
//!
//!     fn marker() -> MarkerStrategy {
//!         MarkerStrategy::ActiveFlag { field: "is_not_deleted" }
//!     }
//!     fn marker_value(&self) -> MarkerValue {
//!         MarkerValue::TriState(self.is_not_deleted)
//!     }
//!
//!     fn select_base_sql() -> &'static str { "SELECT * FROM products" }
//!     fn insert_sql() -> &'static str {
//!         "INSERT INTO products (title, deleted_at, is_not_deleted) \
//!          VALUES ($1, $2, $3) RETURNING *"
//!     }
//!     fn update_sql() -> &'static str {
//!         "UPDATE products SET title = $1 WHERE id = $2"
//!     }
//!     fn bind_insert_params<'a>(
//!         &'a self,
//!         sql: &'a str,
//!     ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments> {
//!         sqlx::query(sql)
//!             .bind(&self.title)
//!             .bind(self.deleted_at)
//!             .bind(self.is_not_deleted)
//!     }
//!     fn bind_update_params<'a>(
//!         &'a self,
//!         sql: &'a str,
//!     ) -> sqlx::query::Query<'a, sqlx::Postgres, sqlx::postgres::PgArguments> {
//!         sqlx::query(sql).bind(&self.title).bind(self.id)
//!     }
//!     fn apply_deletion_marks(&mut self, marks: &DeletionMarks) {
//!         self.deleted_at = Some(marks.deleted_at);
//!         self.is_not_deleted = None;
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "softhaus".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let mut softhaus = SoftHaus::new(config).await?;
//!     let product_store = GenericStore::<Product>::new(
//!         softhaus.pool().clone(),
//!         Some(softhaus.signal_manager()),
//!     );
//!     softhaus.register_store("products".to_string(), product_store)?;
//!
//!     let product_store = softhaus.get_store::<GenericStore<Product>>("products")?;
//!     let created = product_store.create(Product {
//!         id: 0,
//!         title: "widget".to_string(),
//!         deleted_at: None,
//!         is_not_deleted: Some(true),
//!     }).await?;
//!
//!     let mut record = TrackedRecord::new(created);
//!     let affected = product_store.destroy(&mut record).await?;
//!     assert_eq!(affected, 1);
//!     assert!(record.is_destroyed());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::SoftHaus;
pub use errors::SoftHausError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, SignalConfig};

// Re-export internal crates used by the public API
pub use signal_system;
pub use store_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
