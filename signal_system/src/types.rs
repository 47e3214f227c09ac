//! Type definitions for signal system
//!
//! This module contains the callback and payload types shared by
//! the signal system.

use crate::event::DatabaseEvent;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;

/// Payload attached to a database event, keyed by field name
pub type EventPayload = HashMap<String, serde_json::Value>;

/// Async event callback type that returns a Result
pub type EventCallback =
    Arc<dyn Fn(DatabaseEvent) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Payload key under which the full pre-transition record is stored
pub const RECORD_PAYLOAD_KEY: &str = "__record__";
