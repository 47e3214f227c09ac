use thiserror::Error;

#[derive(Error, Debug)]
pub enum SofthausError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Stale record: {0}")]
    StaleRecord(String),

    #[error("Frozen record: {0}")]
    FrozenRecord(String),
}

impl SofthausError {
    /// Storage failure during a named operation; the driver message is kept as is
    pub fn database_operation(table: &str, operation: &str, error: sqlx::Error) -> Self {
        Self::DatabaseError(format!("{} on {}: {}", operation, table, error))
    }

    pub fn validation(table: &str, field: &str, message: &str) -> Self {
        Self::ValidationError(format!("{}.{}: {}", table, field, message))
    }

    pub fn not_found(table: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} row with id {}", table, id))
    }

    /// Version or visibility conflict on the conditional destroy update
    pub fn stale_record(table: &str, id: impl std::fmt::Display) -> Self {
        Self::StaleRecord(format!(
            "conditional update on {} (id {}) matched no visible row",
            table, id
        ))
    }

    pub fn frozen(table: &str, id: impl std::fmt::Display) -> Self {
        Self::FrozenRecord(format!("{} row with id {} is frozen", table, id))
    }

    pub fn serialization(error: serde_json::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}
