use super::Interaction;
use crate::filters::label::format_number;
use crate::filters::{FilterSet, FilterStore};
use crate::model::{AttributeDescriptor, FilterPayload, FilterValue};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub selected: bool,
    pub available: bool,
}

/// Editor for ENUM attributes and VARCHAR attributes with a fixed option list.
///
/// Multi-select attributes store a `MultiSelect` list; single-select ones store
/// the chosen option as `Text`. Options missing from a non-empty
/// `available_options` cannot be newly selected, though an already selected
/// one can still be toggled off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectWidget {
    code: String,
}

impl SelectWidget {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Currently selected options. Shapes other than a list or a scalar read
    /// as no selection.
    pub fn selected(&self, pending: &FilterSet) -> Vec<String> {
        match pending.get(&self.code) {
            Some(FilterPayload::MultiSelect(items)) => items.clone(),
            Some(FilterPayload::Text(s)) => vec![s.clone()],
            Some(FilterPayload::Number(n)) => vec![format_number(*n)],
            _ => Vec::new(),
        }
    }

    pub fn toggle(
        &self,
        option: &str,
        attr: &AttributeDescriptor,
        store: &mut FilterStore,
    ) -> Option<Interaction> {
        let mut selected = self.selected(store.pending());
        let is_selected = selected.iter().any(|s| s == option);

        if !is_selected && !attr.is_option_available(option) {
            debug!("{}: option {:?} is unavailable", self.code, option);
            return None;
        }

        let changed = if attr.is_multiple {
            if is_selected {
                selected.retain(|s| s != option);
            } else {
                selected.push(option.to_string());
            }
            if selected.is_empty() {
                store.remove_filter(&self.code)
            } else {
                store.set_filter(FilterValue::new(
                    self.code.clone(),
                    FilterPayload::MultiSelect(selected),
                ))
            }
        } else if is_selected {
            store.remove_filter(&self.code)
        } else {
            store.set_filter(FilterValue::new(
                self.code.clone(),
                FilterPayload::Text(option.to_string()),
            ))
        };
        changed.then(|| Interaction::new(&self.code))
    }

    pub fn clear(&self, store: &mut FilterStore) -> Option<Interaction> {
        store
            .remove_filter(&self.code)
            .then(|| Interaction::new(&self.code))
    }

    pub fn options_view(&self, attr: &AttributeDescriptor, pending: &FilterSet) -> Vec<OptionView> {
        let selected = self.selected(pending);
        attr.option_values()
            .map(|value| OptionView {
                value: value.to_string(),
                selected: selected.iter().any(|s| s == value),
                available: attr.is_option_available(value),
            })
            .collect()
    }
}
