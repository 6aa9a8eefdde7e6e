use crate::error::Result;
use crate::model::{AttributeDescriptor, ContactInfo, Listing};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SAMPLE: &str = include_str!("sample.json");

/// Everything a [`super::DatasetSource`] serves: attribute definitions, listings
/// and the contact records keyed by listing id.
///
/// Definitions carry no `available_*` data; that is computed per query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub contacts: BTreeMap<i64, ContactInfo>,
}

/// A dozen Tashkent flats across six districts, for sales and rentals.
pub fn sample_dataset() -> Result<Dataset> {
    Ok(serde_json::from_str(SAMPLE)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_parses() {
        let data = sample_dataset().unwrap();
        assert_eq!(data.attributes.len(), 10);
        assert_eq!(data.listings.len(), 12);
        assert!(data.contacts.contains_key(&1004));
        assert!(data
            .attributes
            .iter()
            .any(|a| a.code == "district" && a.is_multiple));
    }
}
