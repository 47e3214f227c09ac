//! Signal system for database event handling
//!
//! This crate provides async signal handling and event processing
//! for database operations in the SoftHaus ecosystem. Stores emit a
//! `Destroy` event once per successful soft deletion; subscribers are the
//! post-destroy lifecycle hooks (webhooks, cache eviction, audit feeds).

pub mod conversion;
pub mod event;
pub mod manager;
pub mod prelude;
pub mod types;

pub use conversion::{record_snapshot, serialize_record_payload};
pub use event::{DatabaseEvent, EventType};
pub use manager::SignalManager;
pub use types::{EventCallback, EventPayload, RECORD_PAYLOAD_KEY};
