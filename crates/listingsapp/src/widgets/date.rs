use super::Interaction;
use crate::filters::{FilterSet, FilterStore};
use crate::model::{is_iso_date, FilterPayload, FilterValue};
use log::warn;

/// Editor for DATE attributes. Picking a start without an end filters on
/// that single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeWidget {
    code: String,
}

impl DateRangeWidget {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn range(&self, pending: &FilterSet) -> Option<(String, String)> {
        match pending.get(&self.code) {
            Some(FilterPayload::DateRange(from, to)) => Some((from.clone(), to.clone())),
            _ => None,
        }
    }

    pub fn pick(&self, from: &str, to: Option<&str>, store: &mut FilterStore) -> Option<Interaction> {
        let to = to.unwrap_or(from);
        if !is_iso_date(from) || !is_iso_date(to) {
            warn!("{}: ignoring invalid date range {:?}..{:?}", self.code, from, to);
            return None;
        }
        store
            .set_filter(FilterValue::new(
                self.code.clone(),
                FilterPayload::DateRange(from.to_string(), to.to_string()),
            ))
            .then(|| Interaction::new(&self.code))
    }

    pub fn clear(&self, store: &mut FilterStore) -> Option<Interaction> {
        store
            .remove_filter(&self.code)
            .then(|| Interaction::new(&self.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_day_uses_start_for_both_ends() {
        let mut store = FilterStore::new();
        let widget = DateRangeWidget::new("created_at");
        assert!(widget.pick("2024-03-01", None, &mut store).is_some());
        assert_eq!(
            widget.range(store.pending()),
            Some(("2024-03-01".to_string(), "2024-03-01".to_string()))
        );
    }

    #[test]
    fn invalid_dates_are_ignored() {
        let mut store = FilterStore::new();
        let widget = DateRangeWidget::new("created_at");
        assert_eq!(widget.pick("2024-13-01", Some("2024-12-01"), &mut store), None);
        assert!(store.pending().is_empty());
    }

    #[test]
    fn repeating_the_same_pick_is_not_an_interaction() {
        let mut store = FilterStore::new();
        let widget = DateRangeWidget::new("created_at");
        widget.pick("2024-03-01", Some("2024-03-31"), &mut store);
        assert_eq!(widget.pick("2024-03-01", Some("2024-03-31"), &mut store), None);
    }
}
