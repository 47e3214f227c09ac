//! Tracked records
//!
//! `TrackedRecord` pairs a model with the transient state one soft-delete
//! flow needs: staged deletion marks, the committed-destroyed flag, the
//! bypass scope and the frozen flag. The original behavior kept these as
//! hidden instance variables; here they are an explicit per-record state
//! object with scoped cleanup.

use chrono::{DateTime, Utc};

use crate::errors::SofthausError;
use crate::traits::record_metadata::RecordMetadata;

/// Field values staged for one soft-delete transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionMarks {
    pub deleted_at: DateTime<Utc>,
    /// Set when the record type tracks an updated_at column
    pub updated_at: Option<DateTime<Utc>>,
}

impl DeletionMarks {
    pub fn compute<T: RecordMetadata>(now: DateTime<Utc>) -> Self {
        Self {
            deleted_at: now,
            updated_at: T::updated_at_field().map(|_| now),
        }
    }
}

/// Transient soft-delete state for one in-memory record
#[derive(Debug, Clone, Default)]
pub(crate) struct DestroyState {
    staged: Option<DeletionMarks>,
    destroyed: bool,
    bypass: bool,
    frozen: bool,
}

/// Clears the bypass flag on every exit path, panics included
pub(crate) struct BypassScope<'a> {
    bypass: &'a mut bool,
}

impl Drop for BypassScope<'_> {
    fn drop(&mut self) {
        *self.bypass = false;
    }
}

/// A model plus the state the soft-deletion overlay tracks for it
#[derive(Debug, Clone)]
pub struct TrackedRecord<T: RecordMetadata> {
    model: T,
    state: DestroyState,
}

impl<T: RecordMetadata> TrackedRecord<T> {
    pub fn new(model: T) -> Self {
        Self {
            model,
            state: DestroyState::default(),
        }
    }

    pub fn model(&self) -> &T {
        &self.model
    }

    /// Mutable access to the model; refused once the record is frozen
    pub fn model_mut(&mut self) -> Result<&mut T, SofthausError> {
        if self.state.frozen {
            return Err(SofthausError::frozen(
                T::table_name(),
                self.model.extract_id().universal_id_display(),
            ));
        }
        Ok(&mut self.model)
    }

    pub fn into_model(self) -> T {
        self.model
    }

    pub fn id(&self) -> T::Id {
        self.model.extract_id()
    }

    /// True iff the record has not yet been marked deleted. Pure.
    pub fn is_deletable(&self) -> bool {
        !self.state.destroyed && !T::marker().is_deleted(self.model.marker_value())
    }

    /// The overlay's destroyed predicate.
    ///
    /// Reports true from the moment a deletion is staged, through the
    /// conditional update committing, and onward. Inside a bypass scope only
    /// the committed flag is consulted, so "save ignoring soft deletion"
    /// write paths observe the literal persisted state.
    pub fn is_destroyed(&self) -> bool {
        if self.state.bypass {
            return self.state.destroyed;
        }
        self.state.destroyed
            || self.state.staged.is_some()
            || T::marker().is_deleted(self.model.marker_value())
    }

    /// Freeze the record against further mutation.
    ///
    /// Refused (returns false) while a deletion is staged.
    pub fn freeze(&mut self) -> bool {
        if self.state.staged.is_some() {
            return false;
        }
        self.state.frozen = true;
        true
    }

    pub fn is_frozen(&self) -> bool {
        self.state.frozen
    }

    pub(crate) fn stage(&mut self, marks: DeletionMarks) {
        self.state.staged = Some(marks);
    }

    pub(crate) fn clear_staged(&mut self) {
        self.state.staged = None;
    }

    /// Apply the staged marks to the model and set the committed flag.
    /// Must only be called after the conditional update affected the row.
    pub(crate) fn commit_destroy(&mut self) {
        if let Some(marks) = self.state.staged.clone() {
            self.model.apply_deletion_marks(&marks);
        }
        self.state.destroyed = true;
    }

    /// Reset the cached destroyed flag; reload does this before re-reading
    pub(crate) fn reset_destroyed(&mut self) {
        self.state.destroyed = false;
    }

    pub(crate) fn replace_model(&mut self, model: T) {
        self.model = model;
    }

    /// Enter a bypass scope. The returned guard clears the flag when
    /// dropped; the model reference stays usable for query binding.
    pub(crate) fn enter_bypass(&mut self) -> (&T, BypassScope<'_>) {
        self.state.bypass = true;
        (
            &self.model,
            BypassScope {
                bypass: &mut self.state.bypass,
            },
        )
    }

    #[cfg(test)]
    pub(crate) fn bypass_active(&self) -> bool {
        self.state.bypass
    }
}

// Display helper for error construction without dragging UniversalId into
// every signature.
trait UniversalIdDisplay {
    fn universal_id_display(&self) -> String;
}

impl<I: crate::id_type::HasUniversalId> UniversalIdDisplay for I {
    fn universal_id_display(&self) -> String {
        self.universal_id().to_string_fast()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{active_product, Product};

    fn tracked() -> TrackedRecord<Product> {
        TrackedRecord::new(active_product(1))
    }

    fn marks() -> DeletionMarks {
        DeletionMarks::compute::<Product>(Utc::now())
    }

    #[test]
    fn fresh_records_are_deletable_and_not_destroyed() {
        let record = tracked();
        assert!(record.is_deletable());
        assert!(!record.is_destroyed());
    }

    #[test]
    fn destroyed_flips_at_staging() {
        // Pins the ordering: staged -> destroyed reports true -> commit
        // keeps it true -> clearing the stage does not un-destroy.
        let mut record = tracked();

        record.stage(marks());
        assert!(record.is_destroyed());
        assert!(record.is_deletable(), "marker fields are untouched while staged");

        record.commit_destroy();
        assert!(record.is_destroyed());
        assert!(!record.is_deletable());

        record.clear_staged();
        assert!(record.is_destroyed());
    }

    #[test]
    fn clearing_a_failed_stage_restores_the_record() {
        let mut record = tracked();
        record.stage(marks());
        record.clear_staged();

        assert!(!record.is_destroyed());
        assert!(record.is_deletable());
    }

    #[test]
    fn commit_applies_marks_to_the_model() {
        let mut record = tracked();
        let marks = marks();
        record.stage(marks.clone());
        record.commit_destroy();
        record.clear_staged();

        assert_eq!(record.model().deleted_at, Some(marks.deleted_at));
        assert_eq!(record.model().updated_at, marks.updated_at);
        assert_eq!(record.model().is_not_deleted, None);
    }

    #[test]
    fn bypass_scope_reports_only_the_committed_flag() {
        let mut record = tracked();
        record.model.is_not_deleted = None; // marker says deleted

        assert!(record.is_destroyed());
        {
            let (_model, _scope) = record.enter_bypass();
        }
        assert!(!record.bypass_active());

        record.state.bypass = true;
        assert!(!record.is_destroyed(), "marker state is suppressed under bypass");
        record.state.destroyed = true;
        assert!(record.is_destroyed(), "committed flag still shows through");
        record.state.bypass = false;
    }

    #[test]
    fn bypass_scope_clears_on_drop_even_when_dropped_early() {
        let mut record = tracked();
        {
            let (_model, scope) = record.enter_bypass();
            drop(scope);
        }
        assert!(!record.bypass_active());
        assert!(!record.is_destroyed());
    }

    #[test]
    fn freeze_is_refused_while_a_deletion_is_staged() {
        let mut record = tracked();
        record.stage(marks());
        assert!(!record.freeze());
        assert!(!record.is_frozen());

        record.clear_staged();
        assert!(record.freeze());
        assert!(record.is_frozen());
        assert!(record.model_mut().is_err());
    }

    #[test]
    fn reload_reset_clears_the_cached_flag() {
        let mut record = tracked();
        record.stage(marks());
        record.commit_destroy();
        record.clear_staged();
        assert!(record.is_destroyed());

        record.reset_destroyed();
        // marker fields still say deleted until a fresh row is read back
        assert!(record.is_destroyed());
        record.replace_model(active_product(1));
        assert!(!record.is_destroyed());
    }
}
