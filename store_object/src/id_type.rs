//! Id Type module
//!
//! Cross-store id currency: cascade destroys and counter-cache updates
//! reach other tables through `UniversalId`, whatever the concrete key type
//! of the record that triggered them.

use std::fmt::{self, Display, Write};
use uuid::Uuid;

/// Universal ID type that can handle both numeric IDs and UUIDs efficiently
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UniversalId {
    /// Numeric ID (i32, i64, etc.)
    Numeric(i64),
    /// UUID ID
    Uuid(Uuid),
    /// String-based ID
    String(String),
}

impl UniversalId {
    /// Efficiently convert ID to string without format! allocations
    pub fn to_string_fast(&self) -> String {
        match self {
            UniversalId::Numeric(n) => {
                let mut buffer = String::with_capacity(20);
                let _ = write!(buffer, "{}", n);
                buffer
            }
            UniversalId::Uuid(uuid) => uuid.to_string(),
            UniversalId::String(s) => s.clone(),
        }
    }
}

impl Display for UniversalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniversalId::Numeric(n) => write!(f, "{}", n),
            UniversalId::Uuid(uuid) => write!(f, "{}", uuid),
            UniversalId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for UniversalId {
    fn from(id: i32) -> Self {
        UniversalId::Numeric(id as i64)
    }
}

impl From<i64> for UniversalId {
    fn from(id: i64) -> Self {
        UniversalId::Numeric(id)
    }
}

impl From<Uuid> for UniversalId {
    fn from(id: Uuid) -> Self {
        UniversalId::Uuid(id)
    }
}

impl From<String> for UniversalId {
    fn from(id: String) -> Self {
        UniversalId::String(id)
    }
}

/// Types usable as primary keys across store boundaries
pub trait HasUniversalId {
    fn universal_id(&self) -> UniversalId;
}

impl HasUniversalId for i32 {
    fn universal_id(&self) -> UniversalId {
        UniversalId::Numeric(*self as i64)
    }
}

impl HasUniversalId for i64 {
    fn universal_id(&self) -> UniversalId {
        UniversalId::Numeric(*self)
    }
}

impl HasUniversalId for Uuid {
    fn universal_id(&self) -> UniversalId {
        UniversalId::Uuid(*self)
    }
}

impl HasUniversalId for String {
    fn universal_id(&self) -> UniversalId {
        UniversalId::String(self.clone())
    }
}

// Shared bind logic: the concrete Postgres parameter type depends on the
// id variant, so binding has to dispatch per call site.
macro_rules! bind_universal_id {
    ($query:expr, $id:expr) => {
        match $id {
            $crate::id_type::UniversalId::Numeric(n) => $query.bind(*n),
            $crate::id_type::UniversalId::Uuid(u) => $query.bind(*u),
            $crate::id_type::UniversalId::String(s) => $query.bind(s.clone()),
        }
    };
}
pub(crate) use bind_universal_id;
