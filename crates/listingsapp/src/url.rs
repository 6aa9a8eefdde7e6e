//! # URL Synchronization
//!
//! Applied filters live in the page URL as flat query parameters:
//!
//! ```text
//! /en/listings?sort=new&filter_price=%5B100000%2C300000%5D&filter_is_furnished=true
//! ```
//!
//! Every filter is one `filter_<attributeCode>` parameter. Other parameters
//! belong to someone else and are carried through untouched.
//!
//! ## Decoding
//!
//! Values are decoded with a fixed precedence:
//!
//! 1. Bracket-delimited (`[...]`): parsed as a JSON array. Malformed JSON or an
//!    array of the wrong shape is logged and kept as plain text.
//! 2. Empty: `Null` (the encoding of `null`).
//! 3. Fully numeric and finite: a number.
//! 4. Exactly `true` or `false`: a boolean.
//! 5. Anything else: text.
//!
//! Decoding never fails.
//!
//! ## Encoding
//!
//! Encoding drops every existing `filter_` parameter and appends one per applied
//! filter, in order. Arrays are written as canonical JSON, `Null` as the empty
//! string, everything else as its string form. The caller replaces the current
//! location with the result, so repeated apply/clear cycles never accumulate
//! stale parameters.

use crate::filters::FilterSet;
use crate::model::{FilterPayload, FilterValue};
use log::warn;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

pub const FILTER_PREFIX: &str = "filter_";

/// Ordered query parameters. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `a=1&b=2`, with or without a leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = query
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((k, v)) => (decode_component(k), decode_component(v)),
                None => (decode_component(part), String::new()),
            })
            .collect();
        Self { pairs }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn remove_prefixed(&mut self, prefix: &str) {
        self.pairs.retain(|(k, _)| !k.starts_with(prefix));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", urlencoding::encode(k), urlencoding::encode(v))?;
        }
        Ok(())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced: Cow<str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes()))
            .into_owned(),
    }
}

/// A page location: optional locale segment, path and query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    pub locale: Option<String>,
    pub path: String,
    pub params: QueryParams,
}

impl PageLocation {
    pub fn new(locale: Option<&str>, path: &str) -> Self {
        Self {
            locale: locale.map(str::to_string),
            path: normalize_path(path),
            params: QueryParams::new(),
        }
    }

    /// Parses a full URL (`https://host/en/listings?...`), a path with query, or a
    /// bare query string. Fragments are dropped.
    pub fn parse(input: &str) -> Self {
        let input = input.split('#').next().unwrap_or_default();
        let without_origin = match input.find("://") {
            Some(idx) => {
                let rest = &input[idx + 3..];
                rest.find(['/', '?']).map_or("", |slash| &rest[slash..])
            }
            None => input,
        };
        let (path, query) = without_origin
            .split_once('?')
            .unwrap_or((without_origin, ""));

        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
        let locale = match segments.peek() {
            Some(first) if is_locale(first) => segments.next().map(str::to_string),
            _ => None,
        };
        let rest: Vec<&str> = segments.collect();

        Self {
            locale,
            path: format!("/{}", rest.join("/")),
            params: QueryParams::parse(query),
        }
    }

    /// Filters decoded from this location's `filter_` parameters.
    pub fn filters(&self) -> FilterSet {
        decode_filters(&self.params)
    }

    /// This location with its filter parameters rewritten for `set`.
    pub fn with_filters(&self, set: &FilterSet) -> PageLocation {
        PageLocation {
            locale: self.locale.clone(),
            path: self.path.clone(),
            params: encode_filters(&self.params, set),
        }
    }

    pub fn with_locale(&self, locale: &str) -> PageLocation {
        PageLocation {
            locale: Some(locale.to_string()),
            ..self.clone()
        }
    }
}

impl fmt::Display for PageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(locale) = &self.locale {
            write!(f, "/{}", locale)?;
        }
        if self.path != "/" || self.locale.is_none() {
            f.write_str(&self.path)?;
        }
        if !self.params.is_empty() {
            write!(f, "?{}", self.params)?;
        }
        Ok(())
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}

fn is_locale(segment: &str) -> bool {
    segment.len() == 2 && segment.chars().all(|c| c.is_ascii_lowercase())
}

pub fn decode_value(raw: &str) -> FilterPayload {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return match serde_json::from_str::<Value>(trimmed) {
            Ok(json) => match FilterPayload::from_json(&json) {
                Some(payload) if payload.is_array() => payload,
                _ => {
                    warn!("Unsupported array filter value {:?}, keeping as text", raw);
                    FilterPayload::Text(raw.to_string())
                }
            },
            Err(e) => {
                warn!("Malformed array filter value {:?}: {}", raw, e);
                FilterPayload::Text(raw.to_string())
            }
        };
    }

    if raw.is_empty() {
        return FilterPayload::Null;
    }
    if let Some(n) = parse_number(raw) {
        return FilterPayload::Number(n);
    }
    match raw {
        "true" => FilterPayload::Bool(true),
        "false" => FilterPayload::Bool(false),
        _ => FilterPayload::Text(raw.to_string()),
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let first = raw.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn encode_value(value: &FilterPayload) -> String {
    match value {
        FilterPayload::Null => String::new(),
        FilterPayload::Bool(b) => b.to_string(),
        FilterPayload::Text(s) => s.clone(),
        FilterPayload::Number(_)
        | FilterPayload::Range(..)
        | FilterPayload::DateRange(..)
        | FilterPayload::MultiSelect(_) => value.canonical(),
    }
}

pub fn decode_filters(params: &QueryParams) -> FilterSet {
    params
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(FILTER_PREFIX)
                .filter(|code| !code.is_empty())
                .map(|code| FilterValue::new(code, decode_value(value)))
        })
        .collect()
}

pub fn encode_filters(params: &QueryParams, set: &FilterSet) -> QueryParams {
    let mut out = params.clone();
    out.remove_prefixed(FILTER_PREFIX);
    for fv in set {
        out.append(
            format!("{}{}", FILTER_PREFIX, fv.attribute_code),
            encode_value(&fv.value),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_district_multi_select() {
        let loc = PageLocation::parse(
            "/en/listings?filter_district=%5B%22Yunusabad%22%2C%22Mirzo-Ulugbek%22%5D",
        );
        let set = loc.filters();
        assert_eq!(
            set.to_json(),
            r#"[{"attributeCode":"district","value":["Yunusabad","Mirzo-Ulugbek"]}]"#
        );
    }

    #[test]
    fn decode_precedence() {
        assert_eq!(decode_value("3"), FilterPayload::Number(3.0));
        assert_eq!(decode_value("2.5"), FilterPayload::Number(2.5));
        assert_eq!(decode_value("true"), FilterPayload::Bool(true));
        assert_eq!(decode_value("True"), FilterPayload::Text("True".into()));
        assert_eq!(decode_value("Yunusabad"), FilterPayload::Text("Yunusabad".into()));
        assert_eq!(decode_value(""), FilterPayload::Null);
        assert_eq!(decode_value("inf"), FilterPayload::Text("inf".into()));
        assert_eq!(decode_value("NaN"), FilterPayload::Text("NaN".into()));
        assert_eq!(decode_value("[1,2]"), FilterPayload::Range(1.0, 2.0));
    }

    #[test]
    fn malformed_arrays_fall_back_to_text() {
        assert_eq!(decode_value("[1,2"), FilterPayload::Text("[1,2".into()));
        assert_eq!(decode_value("[oops]"), FilterPayload::Text("[oops]".into()));
        assert_eq!(decode_value("[1,\"a\"]"), FilterPayload::Text("[1,\"a\"]".into()));
    }

    #[test]
    fn no_filter_params_gives_empty_set() {
        let loc = PageLocation::parse("/en/listings?sort=new&page=2");
        assert!(loc.filters().is_empty());
    }

    #[test]
    fn encodes_price_range() {
        let set = FilterSet::new().with_filter(FilterValue::new(
            "price",
            FilterPayload::Range(100000.0, 300000.0),
        ));
        let loc = PageLocation::parse("/en/listings").with_filters(&set);
        assert_eq!(
            loc.to_string(),
            "/en/listings?filter_price=%5B100000%2C300000%5D"
        );
    }

    #[test]
    fn encoding_keeps_unrelated_params() {
        let loc = PageLocation::parse("/ru/listings?sort=new&filter_price=%5B1%2C2%5D&view=grid");
        let set = FilterSet::new()
            .with_filter(FilterValue::new("is_furnished", FilterPayload::Bool(true)));
        let next = loc.with_filters(&set);
        assert_eq!(
            next.to_string(),
            "/ru/listings?sort=new&view=grid&filter_is_furnished=true"
        );
    }

    #[test]
    fn clearing_removes_every_filter_param() {
        let loc = PageLocation::parse("/en/listings?filter_a=1&filter_b=2&q=x");
        assert_eq!(loc.with_filters(&FilterSet::new()).to_string(), "/en/listings?q=x");
    }

    #[test]
    fn round_trip_is_content_equal() {
        let set: FilterSet = vec![
            FilterValue::new("number_of_rooms", FilterPayload::Number(3.0)),
            FilterValue::new("total_area", FilterPayload::Number(54.5)),
            FilterValue::new("is_furnished", FilterPayload::Bool(false)),
            FilterValue::new("housing_type", FilterPayload::Text("Secondary market".into())),
            FilterValue::new("price", FilterPayload::Range(100000.0, 300000.0)),
            FilterValue::new(
                "district",
                FilterPayload::MultiSelect(vec!["Yunusabad".into(), "Mirzo-Ulugbek".into()]),
            ),
            FilterValue::new(
                "created_at",
                FilterPayload::DateRange("2024-01-01".into(), "2024-02-01".into()),
            ),
        ]
        .into_iter()
        .collect();

        let href = PageLocation::parse("/en/listings").with_filters(&set).to_string();
        let decoded = PageLocation::parse(&href).filters();
        assert_eq!(decoded, set);
    }

    #[test]
    fn plus_decodes_as_space() {
        let params = QueryParams::parse("filter_housing_type=New+building");
        assert_eq!(params.get("filter_housing_type"), Some("New building"));
    }

    #[test]
    fn parses_full_urls_and_locale() {
        let loc = PageLocation::parse("https://example.uz/uz/listings?filter_x=1#top");
        assert_eq!(loc.locale.as_deref(), Some("uz"));
        assert_eq!(loc.path, "/listings");
        assert_eq!(loc.params.get("filter_x"), Some("1"));

        let switched = loc.with_locale("ru");
        assert_eq!(switched.to_string(), "/ru/listings?filter_x=1");
    }
}
