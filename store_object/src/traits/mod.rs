//! Traits for database operations
//!
//! This module contains all the traits that define the interface for
//! store operations and the soft-deletion overlay.

pub mod core;
pub mod record_metadata;
pub mod soft_deletable;

// Re-export all public items for convenience
pub use core::StoreObject;
pub use record_metadata::{BelongsTo, RecordMetadata};
pub use soft_deletable::SoftDeletable;
