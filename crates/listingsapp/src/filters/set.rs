use crate::model::{FilterPayload, FilterValue};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// An ordered, immutable set of filters keyed by attribute code.
///
/// Cloning is cheap and shares the underlying container. The `with_*` and
/// `without` methods hand back a clone of `self` (pointer-equal) when the
/// requested change has no net effect, and a fresh container otherwise.
#[derive(Debug, Clone, Default)]
pub struct FilterSet(Arc<Vec<FilterValue>>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a list that may repeat codes. A repeated code keeps
    /// the position of its first occurrence and the value of its last.
    pub fn from_values(values: Vec<FilterValue>) -> Self {
        let mut out: Vec<FilterValue> = Vec::with_capacity(values.len());
        for fv in values {
            match out
                .iter_mut()
                .find(|existing| existing.attribute_code == fv.attribute_code)
            {
                Some(existing) => existing.value = fv.value,
                None => out.push(fv),
            }
        }
        FilterSet(Arc::new(out))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&FilterPayload> {
        self.0
            .iter()
            .find(|fv| fv.attribute_code == code)
            .map(|fv| &fv.value)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn with_filter(&self, fv: FilterValue) -> FilterSet {
        match self.0.iter().position(|e| e.attribute_code == fv.attribute_code) {
            Some(idx) => {
                if self.0[idx].value.canonical() == fv.value.canonical() {
                    return self.clone();
                }
                let mut next = self.0.as_ref().clone();
                next[idx] = fv;
                FilterSet(Arc::new(next))
            }
            None => {
                let mut next = self.0.as_ref().clone();
                next.push(fv);
                FilterSet(Arc::new(next))
            }
        }
    }

    pub fn without(&self, code: &str) -> FilterSet {
        if !self.contains(code) {
            return self.clone();
        }
        let next: Vec<FilterValue> = self
            .0
            .iter()
            .filter(|fv| fv.attribute_code != code)
            .cloned()
            .collect();
        FilterSet(Arc::new(next))
    }

    /// Deep copy into a container that shares nothing with `self`.
    pub fn snapshot(&self) -> FilterSet {
        FilterSet(Arc::new(self.0.as_ref().clone()))
    }

    pub fn ptr_eq(&self, other: &FilterSet) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self.0.as_ref()).unwrap_or_default()
    }

    /// Equality of canonical JSON forms, independent of container identity.
    pub fn content_eq(&self, other: &FilterSet) -> bool {
        self.ptr_eq(other) || self.to_json() == other.to_json()
    }
}

impl PartialEq for FilterSet {
    fn eq(&self, other: &Self) -> bool {
        self.content_eq(other)
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterValue;
    type IntoIter = std::slice::Iter<'a, FilterValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<FilterValue> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterValue>>(iter: I) -> Self {
        FilterSet::from_values(iter.into_iter().collect())
    }
}

impl Serialize for FilterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<FilterValue>::deserialize(deserializer).map(FilterSet::from_values)
    }
}
