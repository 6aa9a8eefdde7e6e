use super::set::FilterSet;
use crate::model::FilterValue;
use log::debug;

/// What an apply or clear did to the applied set.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCommit {
    /// Nothing changed. No URL write, no refetch, no refresh.
    Unchanged,
    /// `applied` was replaced with this set.
    Committed(FilterSet),
}

impl FilterCommit {
    pub fn is_committed(&self) -> bool {
        matches!(self, FilterCommit::Committed(_))
    }
}

/// Holds the applied and pending filter sets for one filter panel.
///
/// `pending` changes incrementally as widgets edit it. `applied` only changes
/// wholesale: a snapshot of `pending` on apply, or empty on clear.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    applied: FilterSet,
    pending: FilterSet,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with both sets equal to `initial` (usually decoded from the URL).
    pub fn from_applied(initial: FilterSet) -> Self {
        Self {
            pending: initial.clone(),
            applied: initial,
        }
    }

    pub fn applied(&self) -> &FilterSet {
        &self.applied
    }

    pub fn pending(&self) -> &FilterSet {
        &self.pending
    }

    /// Returns `true` if `pending` changed.
    pub fn set_filter(&mut self, fv: FilterValue) -> bool {
        let next = self.pending.with_filter(fv);
        self.replace_pending(next)
    }

    /// Returns `true` if `pending` changed.
    pub fn remove_filter(&mut self, code: &str) -> bool {
        let next = self.pending.without(code);
        self.replace_pending(next)
    }

    fn replace_pending(&mut self, next: FilterSet) -> bool {
        if next.ptr_eq(&self.pending) {
            return false;
        }
        self.pending = next;
        true
    }

    /// Empties both sets. Reports a commit only when `applied` had filters.
    pub fn clear_filters(&mut self) -> FilterCommit {
        let had_applied = !self.applied.is_empty();
        if !self.pending.is_empty() {
            self.pending = FilterSet::new();
        }
        if !had_applied {
            debug!("clear_filters: nothing applied");
            return FilterCommit::Unchanged;
        }
        self.applied = FilterSet::new();
        FilterCommit::Committed(self.applied.clone())
    }

    pub fn apply_filters(&mut self) -> FilterCommit {
        if self.pending.content_eq(&self.applied) {
            debug!("apply_filters: pending matches applied");
            return FilterCommit::Unchanged;
        }
        self.applied = self.pending.snapshot();
        debug!("apply_filters: committed {}", self.applied.to_json());
        FilterCommit::Committed(self.applied.clone())
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.pending.content_eq(&self.applied)
    }

    pub fn can_apply(&self) -> bool {
        self.has_unsaved_changes()
    }

    pub fn can_reset(&self) -> bool {
        !self.pending.is_empty() || !self.applied.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterPayload;

    fn price(min: f64, max: f64) -> FilterValue {
        FilterValue::new("price", FilterPayload::Range(min, max))
    }

    #[test]
    fn pending_edits_enable_apply() {
        let mut store = FilterStore::new();
        assert!(!store.can_apply());
        assert!(store.set_filter(price(100000.0, 300000.0)));
        assert!(store.can_apply());
        assert!(store.applied().is_empty());
    }

    #[test]
    fn apply_snapshots_pending() {
        let mut store = FilterStore::new();
        store.set_filter(price(1.0, 2.0));
        let commit = store.apply_filters();

        match commit {
            FilterCommit::Committed(applied) => {
                assert_eq!(&applied, store.pending());
                assert!(!applied.ptr_eq(store.pending()));
            }
            FilterCommit::Unchanged => panic!("expected commit"),
        }
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn apply_without_changes_is_noop() {
        let mut store = FilterStore::new();
        store.set_filter(price(1.0, 2.0));
        store.apply_filters();
        let applied_before = store.applied().clone();

        assert_eq!(store.apply_filters(), FilterCommit::Unchanged);
        assert!(store.applied().ptr_eq(&applied_before));
    }

    #[test]
    fn apply_after_edit_and_revert_is_noop() {
        let mut store = FilterStore::from_applied(FilterSet::new().with_filter(price(1.0, 2.0)));
        store.set_filter(price(5.0, 6.0));
        store.set_filter(price(1.0, 2.0));
        assert!(!store.has_unsaved_changes());
        assert_eq!(store.apply_filters(), FilterCommit::Unchanged);
    }

    #[test]
    fn remove_absent_twice_keeps_reference() {
        let mut store = FilterStore::new();
        store.set_filter(price(1.0, 2.0));
        assert!(!store.remove_filter("district"));
        let before = store.pending().clone();
        assert!(!store.remove_filter("district"));
        assert!(store.pending().ptr_eq(&before));
    }

    #[test]
    fn clear_with_nothing_applied_is_unchanged() {
        let mut store = FilterStore::new();
        store.set_filter(price(1.0, 2.0));
        assert_eq!(store.clear_filters(), FilterCommit::Unchanged);
        assert!(store.pending().is_empty());
    }

    #[test]
    fn clear_with_applied_commits_empty() {
        let mut store = FilterStore::from_applied(FilterSet::new().with_filter(price(1.0, 2.0)));
        let commit = store.clear_filters();
        assert_eq!(commit, FilterCommit::Committed(FilterSet::new()));
        assert!(store.applied().is_empty());
        assert!(store.pending().is_empty());
        assert!(!store.can_reset());
    }
}
