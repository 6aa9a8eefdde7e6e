use super::Interaction;
use crate::filters::{FilterSet, FilterStore};
use crate::model::{FilterPayload, FilterValue};

/// Tri-state editor for BOOLEAN attributes: yes, no or unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleWidget {
    code: String,
}

impl ToggleWidget {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self, pending: &FilterSet) -> Option<bool> {
        match pending.get(&self.code) {
            Some(FilterPayload::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Clicking the selected state unsets it; clicking the other state sets it.
    pub fn click(&self, value: bool, store: &mut FilterStore) -> Option<Interaction> {
        let changed = if self.state(store.pending()) == Some(value) {
            store.remove_filter(&self.code)
        } else {
            store.set_filter(FilterValue::new(self.code.clone(), FilterPayload::Bool(value)))
        };
        changed.then(|| Interaction::new(&self.code))
    }

    pub fn clear(&self, store: &mut FilterStore) -> Option<Interaction> {
        store
            .remove_filter(&self.code)
            .then(|| Interaction::new(&self.code))
    }
}
