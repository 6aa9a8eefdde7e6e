use super::Interaction;
use crate::filters::label::format_number;
use crate::filters::{FilterSet, FilterStore};
use crate::model::{AttributeDescriptor, FilterPayload, FilterValue};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

/// Editor for a NUMBER attribute's inclusive `[min, max]` pair.
///
/// Keeps the raw text of both bounds so partial input ("1", "1.") echoes back
/// as typed. A structured range is only written to `pending` once both bounds
/// parse; clearing both removes the filter. A one-sided edit is committed on
/// [`RangeWidget::finish_edit`] by filling the missing side from the attribute
/// extent (see [`AttributeDescriptor::lower_extent`]). Bounds are never
/// reordered.
///
/// Any keystroke that changes a bound's text counts as an interaction, even
/// when `pending` is left as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeWidget {
    code: String,
    min_text: String,
    max_text: String,
    // Canonical form of the pending value the texts were last derived from.
    seen: Option<String>,
}

impl RangeWidget {
    pub fn new(code: impl Into<String>, pending: &FilterSet) -> Self {
        let mut widget = Self {
            code: code.into(),
            min_text: String::new(),
            max_text: String::new(),
            seen: None,
        };
        widget.load(pending.get(&widget.code));
        widget
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn min_text(&self) -> &str {
        &self.min_text
    }

    pub fn max_text(&self) -> &str {
        &self.max_text
    }

    /// Re-reads `pending`, but only when this attribute's value changed since
    /// the texts were last derived from it.
    pub fn sync(&mut self, pending: &FilterSet) {
        let current = pending.get(&self.code);
        if current.map(FilterPayload::canonical) != self.seen {
            self.load(current);
        }
    }

    fn load(&mut self, value: Option<&FilterPayload>) {
        match value {
            Some(FilterPayload::Range(min, max)) => {
                self.min_text = format_number(*min);
                self.max_text = format_number(*max);
            }
            _ => {
                self.min_text.clear();
                self.max_text.clear();
            }
        }
        self.seen = value.map(FilterPayload::canonical);
    }

    pub fn edit(
        &mut self,
        bound: Bound,
        text: impl Into<String>,
        store: &mut FilterStore,
    ) -> Option<Interaction> {
        let text = text.into();
        let slot = match bound {
            Bound::Min => &mut self.min_text,
            Bound::Max => &mut self.max_text,
        };
        let text_changed = *slot != text;
        *slot = text;

        let committed = match (parse_bound(&self.min_text), parse_bound(&self.max_text)) {
            (Some(min), Some(max)) => self.write(store, FilterPayload::Range(min, max)),
            _ if self.min_text.trim().is_empty() && self.max_text.trim().is_empty() => {
                self.remove(store)
            }
            _ => false,
        };
        (text_changed || committed).then(|| Interaction::new(&self.code))
    }

    /// Commits a one-sided edit by substituting the attribute extent for the
    /// missing bound. Does nothing when neither or both sides are set.
    pub fn finish_edit(
        &mut self,
        attr: &AttributeDescriptor,
        store: &mut FilterStore,
    ) -> Option<Interaction> {
        let min = parse_bound(&self.min_text);
        let max = parse_bound(&self.max_text);
        let (min, max) = match (min, max) {
            (Some(min), None) if self.max_text.trim().is_empty() => (min, attr.upper_extent()),
            (None, Some(max)) if self.min_text.trim().is_empty() => (attr.lower_extent(), max),
            _ => return None,
        };
        debug!("{}: one-sided range committed as [{}, {}]", self.code, min, max);

        let value = FilterPayload::Range(min, max);
        let changed = self.write(store, value.clone());
        self.load(Some(&value));
        changed.then(|| Interaction::new(&self.code))
    }

    pub fn clear(&mut self, store: &mut FilterStore) -> Option<Interaction> {
        self.min_text.clear();
        self.max_text.clear();
        self.remove(store).then(|| Interaction::new(&self.code))
    }

    fn write(&mut self, store: &mut FilterStore, value: FilterPayload) -> bool {
        self.seen = Some(value.canonical());
        store.set_filter(FilterValue::new(self.code.clone(), value))
    }

    fn remove(&mut self, store: &mut FilterStore) -> bool {
        self.seen = None;
        store.remove_filter(&self.code)
    }
}

fn parse_bound(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
