//! Database event types and definitions
//!
//! This module defines the structure of database events
//! that flow through the signal system.

use serde::{Deserialize, Serialize};

use crate::types::EventPayload;

/// Database event type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Create,
    Update,
    /// Logical deletion: the row is still present, marked deleted
    Destroy,
}

/// Database event
///
/// A `Destroy` event is emitted exactly once per successful logical deletion,
/// after the in-memory record reflects the deleted state. Its payload carries
/// the pre-transition shape of the record under [`crate::RECORD_PAYLOAD_KEY`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseEvent {
    /// Event type
    pub event_type: EventType,
    /// Table name
    pub table_name: String,
    /// Record ID (if available)
    pub record_id: Option<String>,
    /// Additional data
    pub payload: EventPayload,
    /// Event timestamp (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl DatabaseEvent {
    pub fn new(event_type: EventType, table_name: String) -> Self {
        Self {
            event_type,
            table_name,
            record_id: None,
            payload: EventPayload::new(),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_record_id(mut self, record_id: String) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn with_payload(mut self, key: String, value: serde_json::Value) -> Self {
        self.payload.insert(key, value);
        self
    }

    pub fn add_payload(&mut self, key: String, value: serde_json::Value) {
        self.payload.insert(key, value);
    }
}
