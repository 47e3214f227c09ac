use serde::Serialize;

use crate::types::EventPayload;

/// Flatten a record's top-level fields into an event payload.
///
/// Non-object values (a bare id, a tuple) land under a single `__value__` key
/// so callers always get a map.
pub fn serialize_record_payload<T: Serialize>(record: &T) -> EventPayload {
    match serde_json::to_value(record) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
        Ok(other) => {
            let mut payload = EventPayload::new();
            payload.insert("__value__".to_string(), other);
            payload
        }
        Err(error) => {
            tracing::warn!(%error, "failed to serialize record payload");
            EventPayload::new()
        }
    }
}

/// Serialize the full record as a single JSON value.
///
/// Used for the pre-transition snapshot attached to destroy events.
pub fn record_snapshot<T: Serialize>(record: &T) -> serde_json::Value {
    serde_json::to_value(record).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        id: i64,
        title: String,
    }

    #[test]
    fn object_records_flatten_by_field() {
        let payload = serialize_record_payload(&Sample {
            id: 7,
            title: "widget".to_string(),
        });

        assert_eq!(payload.get("id"), Some(&serde_json::json!(7)));
        assert_eq!(payload.get("title"), Some(&serde_json::json!("widget")));
    }

    #[test]
    fn scalar_records_land_under_value_key() {
        let payload = serialize_record_payload(&42i32);
        assert_eq!(payload.get("__value__"), Some(&serde_json::json!(42)));
    }
}
