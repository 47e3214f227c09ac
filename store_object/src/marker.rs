//! Marker strategies
//!
//! A marker strategy decides which column encodes "this row is deleted" and
//! how the visibility predicates and the delete assignment are phrased.
//! Each record type picks exactly one variant at definition time via
//! [`crate::traits::RecordMetadata::marker`] and keeps it forever.

/// Which rows a query should see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Default scope: deleted rows excluded
    #[default]
    NotDeleted,
    /// Only deleted rows
    Deleted,
    /// Everything, deleted or not
    Unscoped,
}

/// Current value of a record's marker column, read off the instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerValue {
    /// Value of a `DeletedFlag` column
    Flag(bool),
    /// Value of an `ActiveFlag` column
    TriState(Option<bool>),
}

/// Column-level encoding of the deleted state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStrategy {
    /// Plain boolean column, TRUE once the row is deleted
    DeletedFlag { field: &'static str },
    /// Tri-state boolean column: TRUE while visible, NULL once deleted
    ActiveFlag { field: &'static str },
}

impl MarkerStrategy {
    pub fn field(&self) -> &'static str {
        match self {
            MarkerStrategy::DeletedFlag { field } | MarkerStrategy::ActiveFlag { field } => field,
        }
    }

    /// Predicate selecting visible rows; constant SQL, no bind parameters
    pub fn not_deleted_sql(&self) -> String {
        match self {
            MarkerStrategy::DeletedFlag { field } => format!("{} = FALSE", field),
            MarkerStrategy::ActiveFlag { field } => format!("{} IS TRUE", field),
        }
    }

    /// Complement of [`Self::not_deleted_sql`]; together they classify every
    /// row exactly once, NULLs included
    pub fn deleted_sql(&self) -> String {
        match self {
            MarkerStrategy::DeletedFlag { field } => format!("{} = TRUE", field),
            MarkerStrategy::ActiveFlag { field } => format!("{} IS NOT TRUE", field),
        }
    }

    /// Scope predicate for a visibility, None when unscoped
    pub fn scope_sql(&self, visibility: Visibility) -> Option<String> {
        match visibility {
            Visibility::NotDeleted => Some(self.not_deleted_sql()),
            Visibility::Deleted => Some(self.deleted_sql()),
            Visibility::Unscoped => None,
        }
    }

    /// SET fragment flipping the marker column to deleted
    pub fn delete_assignment_sql(&self) -> String {
        match self {
            MarkerStrategy::DeletedFlag { field } => format!("{} = TRUE", field),
            MarkerStrategy::ActiveFlag { field } => format!("{} = NULL", field),
        }
    }

    /// Interpret an instance's marker value.
    ///
    /// A value from the wrong variant counts as deleted: bad wiring must not
    /// resurrect rows.
    pub fn is_deleted(&self, value: MarkerValue) -> bool {
        match (self, value) {
            (MarkerStrategy::DeletedFlag { .. }, MarkerValue::Flag(deleted)) => deleted,
            (MarkerStrategy::ActiveFlag { .. }, MarkerValue::TriState(active)) => {
                !matches!(active, Some(true))
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELETED_FLAG: MarkerStrategy = MarkerStrategy::DeletedFlag {
        field: "is_deleted",
    };
    const ACTIVE_FLAG: MarkerStrategy = MarkerStrategy::ActiveFlag {
        field: "is_not_deleted",
    };

    #[test]
    fn deleted_flag_predicates() {
        assert_eq!(DELETED_FLAG.not_deleted_sql(), "is_deleted = FALSE");
        assert_eq!(DELETED_FLAG.deleted_sql(), "is_deleted = TRUE");
        assert_eq!(DELETED_FLAG.delete_assignment_sql(), "is_deleted = TRUE");
    }

    #[test]
    fn active_flag_predicates_partition_nulls() {
        assert_eq!(ACTIVE_FLAG.not_deleted_sql(), "is_not_deleted IS TRUE");
        assert_eq!(ACTIVE_FLAG.deleted_sql(), "is_not_deleted IS NOT TRUE");
        assert_eq!(ACTIVE_FLAG.delete_assignment_sql(), "is_not_deleted = NULL");
    }

    #[test]
    fn instance_checks_follow_the_variant() {
        assert!(!DELETED_FLAG.is_deleted(MarkerValue::Flag(false)));
        assert!(DELETED_FLAG.is_deleted(MarkerValue::Flag(true)));

        assert!(!ACTIVE_FLAG.is_deleted(MarkerValue::TriState(Some(true))));
        assert!(ACTIVE_FLAG.is_deleted(MarkerValue::TriState(None)));
        // FALSE is never written by the overlay, but must still read as deleted
        assert!(ACTIVE_FLAG.is_deleted(MarkerValue::TriState(Some(false))));
    }

    #[test]
    fn mismatched_wiring_reads_as_deleted() {
        assert!(DELETED_FLAG.is_deleted(MarkerValue::TriState(Some(true))));
        assert!(ACTIVE_FLAG.is_deleted(MarkerValue::Flag(false)));
    }

    #[test]
    fn unscoped_visibility_drops_the_predicate() {
        assert!(DELETED_FLAG.scope_sql(Visibility::Unscoped).is_none());
        assert_eq!(
            DELETED_FLAG.scope_sql(Visibility::NotDeleted).as_deref(),
            Some("is_deleted = FALSE")
        );
        assert_eq!(
            ACTIVE_FLAG.scope_sql(Visibility::Deleted).as_deref(),
            Some("is_not_deleted IS NOT TRUE")
        );
    }
}
