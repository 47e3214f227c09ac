//! Validation module
//!
//! Identifier validation for the places where caller-supplied names reach
//! SQL text: `UpdateSet` field names and `QueryFilter` fields. Metadata
//! names (`table_name`, `primary_key_field`, ...) are `'static` and trusted.

use std::fmt;

/// Validation errors for database identifiers
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Name contains invalid characters (only alphanumeric and underscore allowed)
    InvalidCharacters(String),
    /// Name is too long (PostgreSQL limit is 63 characters)
    TooLong { name: String, length: usize },
    /// Name is empty
    Empty,
    /// Name starts with invalid character (must start with letter or underscore)
    InvalidStartCharacter(String),
    /// Name is a reserved SQL keyword
    ReservedKeyword(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCharacters(name) => {
                write!(
                    f,
                    "Invalid characters in name '{}': only alphanumeric characters and underscores are allowed",
                    name
                )
            }
            ValidationError::TooLong { name, length } => {
                write!(f, "Name '{}' is too long: {} characters (max 63)", name, length)
            }
            ValidationError::Empty => {
                write!(f, "Name cannot be empty")
            }
            ValidationError::InvalidStartCharacter(name) => {
                write!(f, "Name '{}' must start with a letter or underscore", name)
            }
            ValidationError::ReservedKeyword(name) => {
                write!(f, "Name '{}' is a reserved SQL keyword", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

const MAX_IDENTIFIER_LENGTH: usize = 63;

const RESERVED_KEYWORDS: &[&str] = &[
    "ALL", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC", "ASYMMETRIC",
    "AUTHORIZATION", "BETWEEN", "BINARY", "BOTH", "CASE", "CAST", "CHECK", "COLLATE",
    "COLUMN", "CONSTRAINT", "CREATE", "CROSS", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "CURRENT_USER", "DEFAULT", "DEFERRABLE", "DELETE", "DESC",
    "DISTINCT", "DO", "DROP", "ELSE", "END", "EXCEPT", "FALSE", "FOR", "FOREIGN",
    "FREEZE", "FROM", "FULL", "GRANT", "GROUP", "HAVING", "ILIKE", "IN", "INITIALLY",
    "INNER", "INSERT", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN", "LATERAL",
    "LEADING", "LEFT", "LIKE", "LIMIT", "LOCALTIME", "LOCALTIMESTAMP", "NATURAL",
    "NOT", "NOTNULL", "NULL", "OFFSET", "ON", "ONLY", "OR", "ORDER", "OUTER",
    "OVERLAPS", "PLACING", "PRIMARY", "REFERENCES", "RETURNING", "RIGHT", "SELECT",
    "SESSION_USER", "SIMILAR", "SOME", "SYMMETRIC", "TABLE", "THEN", "TO",
    "TRAILING", "TRUE", "UNION", "UNIQUE", "UPDATE", "USER", "USING", "VARIADIC",
    "VERBOSE", "WHEN", "WHERE", "WINDOW", "WITH",
];

/// A validated field name that is safe to splice into SQL text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedFieldName(String);

impl ValidatedFieldName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }
        if name.len() > MAX_IDENTIFIER_LENGTH {
            return Err(ValidationError::TooLong {
                name: name.to_string(),
                length: name.len(),
            });
        }

        if let Some(first) = name.chars().next() {
            if !first.is_ascii_alphabetic() && first != '_' {
                return Err(ValidationError::InvalidStartCharacter(name.to_string()));
            }
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidCharacters(name.to_string()));
        }
        if RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str()) {
            return Err(ValidationError::ReservedKeyword(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(ValidatedFieldName::new("deleted_at").is_ok());
        assert!(ValidatedFieldName::new("_internal").is_ok());
        assert!(ValidatedFieldName::new("lock_version2").is_ok());
    }

    #[test]
    fn rejects_injection_shaped_names() {
        assert!(ValidatedFieldName::new("title; DROP TABLE products").is_err());
        assert!(ValidatedFieldName::new("is_deleted = TRUE --").is_err());
    }

    #[test]
    fn rejects_empty_reserved_and_misshapen_names() {
        assert_eq!(ValidatedFieldName::new(""), Err(ValidationError::Empty));
        assert!(matches!(
            ValidatedFieldName::new("select"),
            Err(ValidationError::ReservedKeyword(_))
        ));
        assert!(matches!(
            ValidatedFieldName::new("1st_field"),
            Err(ValidationError::InvalidStartCharacter(_))
        ));
        let long = "a".repeat(64);
        assert!(matches!(
            ValidatedFieldName::new(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
