use serde_json::Value;
use std::collections::BTreeMap;

/// Type of update operation to perform on a field
#[derive(Debug, Clone)]
pub enum UpdateOperation {
    /// Set field to a specific value: field = $N
    Set(Value),

    /// Increment field by a value: field = field + $N
    Increment(Value),

    /// Decrement field by a value: field = field - $N
    Decrement(Value),
}

impl UpdateOperation {
    /// Generate the SQL expression for this operation
    /// Example: "field = field + $1" or "field = $1"
    pub fn to_sql(&self, field_name: &str, param_number: usize) -> String {
        match self {
            UpdateOperation::Set(_) => {
                format!("{} = ${}", field_name, param_number)
            }
            UpdateOperation::Increment(_) => {
                format!("{} = {} + ${}", field_name, field_name, param_number)
            }
            UpdateOperation::Decrement(_) => {
                format!("{} = {} - ${}", field_name, field_name, param_number)
            }
        }
    }

    /// Get the value to bind as a parameter
    pub fn value(&self) -> &Value {
        match self {
            UpdateOperation::Set(v)
            | UpdateOperation::Increment(v)
            | UpdateOperation::Decrement(v) => v,
        }
    }
}

/// Container for update operations.
///
/// Fields are kept sorted so generated SQL is deterministic.
#[derive(Debug, Clone, Default)]
pub struct UpdateSet {
    pub operations: BTreeMap<String, UpdateOperation>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self {
            operations: BTreeMap::new(),
        }
    }

    /// Set a field to a specific value
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.operations
            .insert(field.into(), UpdateOperation::Set(value));
        self
    }

    /// Increment a field by a value (atomic: field = field + value)
    pub fn increment(mut self, field: impl Into<String>, value: Value) -> Self {
        self.operations
            .insert(field.into(), UpdateOperation::Increment(value));
        self
    }

    /// Decrement a field by a value (atomic: field = field - value)
    pub fn decrement(mut self, field: impl Into<String>, value: Value) -> Self {
        self.operations
            .insert(field.into(), UpdateOperation::Decrement(value));
        self
    }

    /// Check if there are any operations
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Get number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Build the SET clause starting at `$first_param`, returning the SQL
    /// and the values in bind order
    pub fn to_sql(&self, first_param: usize) -> (String, Vec<Value>) {
        let mut clauses = Vec::with_capacity(self.operations.len());
        let mut values = Vec::with_capacity(self.operations.len());

        for (index, (field, operation)) in self.operations.iter().enumerate() {
            clauses.push(operation.to_sql(field, first_param + index));
            values.push(operation.value().clone());
        }

        (clauses.join(", "), values)
    }
}
