//! # Data Model
//!
//! Plain data types shared by every layer: filter values, attribute descriptors,
//! listings and contact records. Nothing here does I/O.
//!
//! ## Filter Payloads
//!
//! A filter's value is a closed sum type, [`FilterPayload`]. Its JSON form is the
//! one other clients of the listings database already speak:
//!
//! | Variant | JSON |
//! |---------|------|
//! | `Null` | `null` |
//! | `Bool` | `true` / `false` |
//! | `Text` | `"Yunusabad"` |
//! | `Number` | `3` or `42.5` |
//! | `Range` | `[100000,300000]` |
//! | `DateRange` | `["2024-01-01","2024-02-01"]` |
//! | `MultiSelect` | `["Yunusabad","Chilanzar"]` |
//!
//! Integral numbers are always written without a fractional part, so `100000.0`
//! serializes as `100000`. This keeps the canonical JSON (and therefore
//! content-equality and URL encoding) stable.
//!
//! Arrays are classified by shape when read back: two numbers are a `Range`, two
//! ISO dates are a `DateRange`, any list of strings is a `MultiSelect`. Anything
//! else is structurally invalid.

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Base for the public listing page on the marketplace the dataset was scraped from.
pub const LISTING_URL_BASE: &str = "https://www.olx.uz/d/obyavlenie/";

#[derive(Debug, Clone, PartialEq)]
pub enum FilterPayload {
    Null,
    Bool(bool),
    Text(String),
    Number(f64),
    /// Inclusive numeric bounds, `min` first. Not reordered when `min > max`.
    Range(f64, f64),
    /// Inclusive `YYYY-MM-DD` bounds.
    DateRange(String, String),
    MultiSelect(Vec<String>),
}

impl FilterPayload {
    /// Converts a parsed JSON value, returning `None` for shapes that are not
    /// valid filter payloads (objects, nested or mixed arrays).
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FilterPayload::Null),
            Value::Bool(b) => Some(FilterPayload::Bool(*b)),
            Value::String(s) => Some(FilterPayload::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(FilterPayload::Number),
            Value::Array(items) => Self::from_json_array(items),
            Value::Object(_) => None,
        }
    }

    fn from_json_array(items: &[Value]) -> Option<Self> {
        if items.len() == 2 && items.iter().all(Value::is_number) {
            let min = items[0].as_f64()?;
            let max = items[1].as_f64()?;
            return Some(FilterPayload::Range(min, max));
        }

        let strings: Option<Vec<String>> = items
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect();
        let strings = strings?;

        if strings.len() == 2 && strings.iter().all(|s| is_iso_date(s)) {
            return Some(FilterPayload::DateRange(
                strings[0].clone(),
                strings[1].clone(),
            ));
        }
        Some(FilterPayload::MultiSelect(strings))
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            FilterPayload::Range(..) | FilterPayload::DateRange(..) | FilterPayload::MultiSelect(_)
        )
    }

    /// Canonical JSON text, used for content-equality.
    pub fn canonical(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub(crate) fn is_iso_date(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// `n` as an integer when it is integral and exactly representable (|n| < 2^53).
pub(crate) fn exact_integer(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15).then_some(n as i64)
}

/// Writes integral finite numbers as integers.
struct Num(f64);

impl Serialize for Num {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match exact_integer(self.0) {
            Some(i) => serializer.serialize_i64(i),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl Serialize for FilterPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterPayload::Null => serializer.serialize_unit(),
            FilterPayload::Bool(b) => serializer.serialize_bool(*b),
            FilterPayload::Text(s) => serializer.serialize_str(s),
            FilterPayload::Number(n) => Num(*n).serialize(serializer),
            FilterPayload::Range(min, max) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&Num(*min))?;
                seq.serialize_element(&Num(*max))?;
                seq.end()
            }
            FilterPayload::DateRange(from, to) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(from)?;
                seq.serialize_element(to)?;
                seq.end()
            }
            FilterPayload::MultiSelect(items) => items.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FilterPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        FilterPayload::from_json(&value)
            .ok_or_else(|| D::Error::custom(format!("invalid filter value: {}", value)))
    }
}

/// One attribute constraint. At most one per `attribute_code` in a [`crate::filters::FilterSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterValue {
    #[serde(rename = "attributeCode")]
    pub attribute_code: String,
    pub value: FilterPayload,
}

impl FilterValue {
    pub fn new(attribute_code: impl Into<String>, value: FilterPayload) -> Self {
        Self {
            attribute_code: attribute_code.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeKind {
    Number,
    Boolean,
    Enum,
    Varchar,
    Date,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Number => "NUMBER",
            AttributeKind::Boolean => "BOOLEAN",
            AttributeKind::Enum => "ENUM",
            AttributeKind::Varchar => "VARCHAR",
            AttributeKind::Date => "DATE",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOption {
    pub id: i64,
    pub option_value: String,
}

/// Metadata and dataset-scoped availability for one filterable attribute.
///
/// The `available_*` fields describe what is still reachable under the
/// *applied* filters. They are display hints only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    #[serde(default)]
    pub options: Vec<AttributeOption>,
    #[serde(default)]
    pub is_multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_options: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_values: Option<BTreeSet<bool>>,
}

impl AttributeDescriptor {
    pub fn new(code: impl Into<String>, name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            kind,
            options: Vec::new(),
            is_multiple: false,
            min_value: None,
            max_value: None,
            available_min_value: None,
            available_max_value: None,
            available_options: None,
            available_values: None,
        }
    }

    pub fn with_options<I, T>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.options = options
            .into_iter()
            .enumerate()
            .map(|(i, v)| AttributeOption {
                id: i as i64 + 1,
                option_value: v.into(),
            })
            .collect();
        self
    }

    pub fn multiple(mut self) -> Self {
        self.is_multiple = true;
        self
    }

    pub fn with_extent(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.option_value.as_str())
    }

    /// Whether `option` may be newly selected. An absent or empty
    /// `available_options` set means everything is available.
    pub fn is_option_available(&self, option: &str) -> bool {
        match &self.available_options {
            Some(set) if !set.is_empty() => set.contains(option),
            _ => true,
        }
    }

    /// Lower bound used when a range is committed with only its max side.
    pub fn lower_extent(&self) -> f64 {
        self.available_min_value.or(self.min_value).unwrap_or(0.0)
    }

    /// Upper bound used when a range is committed with only its min side.
    pub fn upper_extent(&self) -> f64 {
        self.available_max_value.or(self.max_value).unwrap_or(100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
}

impl Listing {
    pub fn external_url(&self) -> String {
        format!("{}{}", LISTING_URL_BASE, self.slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub data: Vec<Listing>,
}

impl ListingPage {
    /// The neutral result shown when a search cannot be completed.
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            total: 0,
            page,
            page_size,
            total_pages: 0,
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ContactInfo {
    /// Overlays the fields present in `update`. An empty string clears the field.
    pub fn merged(&self, update: &ContactUpdate) -> ContactInfo {
        ContactInfo {
            author_name: overlay(&self.author_name, &update.author_name),
            author_phone: overlay(&self.author_phone, &update.author_phone),
            notes: overlay(&self.notes, &update.notes),
        }
    }
}

fn overlay(current: &Option<String>, update: &Option<String>) -> Option<String> {
    match update {
        Some(v) if v.is_empty() => None,
        Some(v) => Some(v.clone()),
        None => current.clone(),
    }
}

/// Partial contact record sent to the upsert call. Absent fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self.author_name.is_none() && self.author_phone.is_none() && self.notes.is_none()
    }
}

impl From<&ContactInfo> for ContactUpdate {
    fn from(info: &ContactInfo) -> Self {
        ContactUpdate {
            author_name: info.author_name.clone(),
            author_phone: info.author_phone.clone(),
            notes: info.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDetails {
    pub listing: Listing,
    pub details: ContactInfo,
}
