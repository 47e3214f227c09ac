//! Convenience re-exports for common signal-system usage

// Core signal system components
pub use crate::conversion::{record_snapshot, serialize_record_payload};
pub use crate::event::{DatabaseEvent, EventType};
pub use crate::manager::SignalManager;
pub use crate::types::{EventCallback, EventPayload, RECORD_PAYLOAD_KEY};

// Common external dependencies
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use tokio;
