//! Human-readable labels for applied-filter chips.
//!
//! A chip reads `<Attribute>: <value>`, e.g. `Number Of Rooms: 2 - 3` or
//! `District: Yunusabad, Chilanzar`. The attribute part is the descriptor name
//! when one is known, otherwise the code in title case.

use crate::model::{exact_integer, FilterPayload, FilterValue};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub code: String,
    pub label: String,
}

pub fn title_case(code: &str) -> String {
    code.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn describe_value(value: &FilterPayload) -> String {
    match value {
        FilterPayload::Null => "Any".to_string(),
        FilterPayload::Bool(true) => "Yes".to_string(),
        FilterPayload::Bool(false) => "No".to_string(),
        FilterPayload::Text(s) => s.clone(),
        FilterPayload::Number(n) => format_number(*n),
        FilterPayload::Range(min, max) => format!("{} - {}", format_number(*min), format_number(*max)),
        FilterPayload::DateRange(from, to) => format!("{} - {}", from, to),
        FilterPayload::MultiSelect(items) => items.join(", "),
    }
}

/// Integral values print without a fraction. Values too large for an exact
/// integer print in full float form, which parses back to the same number.
pub fn format_number(n: f64) -> String {
    match exact_integer(n) {
        Some(i) => i.to_string(),
        None => format!("{}", n),
    }
}

/// Label for a filter whose attribute has no descriptor name.
pub fn describe_filter(fv: &FilterValue) -> String {
    chip(fv, None).label
}

pub fn chip(fv: &FilterValue, name: Option<&str>) -> FilterChip {
    let attribute = match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => title_case(&fv.attribute_code),
    };
    FilterChip {
        code: fv.attribute_code.clone(),
        label: format!("{}: {}", attribute, describe_value(&fv.value)),
    }
}
