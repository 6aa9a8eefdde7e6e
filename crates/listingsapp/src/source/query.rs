//! Filter matching, paging and facet computation over an in-memory listing set.
//!
//! ## Matching
//!
//! | Payload | Matches when the listing value... |
//! |---------|-----------------------------------|
//! | `Null` | always |
//! | `Range(a, b)` | is numeric and `a <= v <= b` |
//! | `DateRange(a, b)` | starts with a date `d` and `a <= d <= b` |
//! | `MultiSelect(xs)` | is (or contains) one of `xs`; empty `xs` matches all |
//! | `Text`, `Number`, `Bool` | equals the filter value |
//!
//! A listing without the attribute never matches a non-null filter. `price`,
//! `title` and `created_at` resolve to the listing's own fields.
//!
//! ## Facets
//!
//! Availability for attribute `X` is computed over the listings that match
//! every applied filter *except* `X`'s own, so selecting one district does not
//! hide the other districts from the district list.

use crate::filters::label::format_number;
use crate::filters::FilterSet;
use crate::model::{AttributeDescriptor, AttributeKind, FilterPayload, Listing, ListingPage};
use serde_json::Value;
use std::collections::BTreeSet;

pub fn field_value(listing: &Listing, code: &str) -> Option<Value> {
    match code {
        "id" => Some(Value::from(listing.id)),
        "title" => Some(Value::from(listing.title.clone())),
        "price" => listing.price.map(Value::from),
        "created_at" => Some(Value::from(listing.created_at.format("%Y-%m-%d").to_string())),
        _ => listing.attributes.get(code).cloned(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n.as_f64().map(format_number),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

/// Scalars of `value`, flattening one level of array.
fn scalars(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

pub fn value_matches(value: Option<&Value>, payload: &FilterPayload) -> bool {
    if matches!(payload, FilterPayload::Null) {
        return true;
    }
    if let FilterPayload::MultiSelect(items) = payload {
        if items.is_empty() {
            return true;
        }
    }
    let value = match value {
        None | Some(Value::Null) => return false,
        Some(v) => v,
    };

    match payload {
        FilterPayload::Null => true,
        FilterPayload::Range(min, max) => {
            as_number(value).is_some_and(|v| *min <= v && v <= *max)
        }
        FilterPayload::DateRange(from, to) => as_text(value).is_some_and(|v| {
            let day = v.get(..10).unwrap_or(&v);
            from.as_str() <= day && day <= to.as_str()
        }),
        FilterPayload::MultiSelect(items) => scalars(value)
            .into_iter()
            .filter_map(as_text)
            .any(|v| items.contains(&v)),
        FilterPayload::Text(expected) => scalars(value)
            .into_iter()
            .filter_map(as_text)
            .any(|v| &v == expected),
        FilterPayload::Number(expected) => as_number(value).is_some_and(|v| v == *expected),
        FilterPayload::Bool(expected) => as_bool(value) == Some(*expected),
    }
}

pub fn listing_matches(listing: &Listing, filters: &FilterSet, skip: Option<&str>) -> bool {
    filters
        .iter()
        .filter(|fv| Some(fv.attribute_code.as_str()) != skip)
        .all(|fv| value_matches(field_value(listing, &fv.attribute_code).as_ref(), &fv.value))
}

/// Newest first, 1-based pages. Page 0 is treated as page 1.
pub fn search(listings: &[Listing], filters: &FilterSet, page: u32, page_size: u32) -> ListingPage {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let mut hits: Vec<&Listing> = listings
        .iter()
        .filter(|l| listing_matches(l, filters, None))
        .collect();
    hits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let total = hits.len() as u64;
    let total_pages = total.div_ceil(page_size as u64) as u32;
    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let data = hits
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .cloned()
        .collect();

    ListingPage {
        total,
        page,
        page_size,
        total_pages,
        data,
    }
}

/// One descriptor per definition, with whole-dataset extents and availability
/// scoped to `applied`.
pub fn catalog(
    definitions: &[AttributeDescriptor],
    listings: &[Listing],
    applied: &FilterSet,
) -> Vec<AttributeDescriptor> {
    definitions
        .iter()
        .map(|def| describe(def, listings, applied))
        .collect()
}

fn describe(def: &AttributeDescriptor, listings: &[Listing], applied: &FilterSet) -> AttributeDescriptor {
    let mut desc = def.clone();
    let all = values_of(&def.code, listings.iter());
    let reachable = values_of(
        &def.code,
        listings
            .iter()
            .filter(|l| listing_matches(l, applied, Some(&def.code))),
    );

    match def.kind {
        AttributeKind::Number => {
            let (min, max) = extent(&all);
            desc.min_value = min;
            desc.max_value = max;
            let (available_min, available_max) = extent(&reachable);
            desc.available_min_value = available_min;
            desc.available_max_value = available_max;
        }
        AttributeKind::Enum | AttributeKind::Varchar if !def.options.is_empty() => {
            let present: BTreeSet<String> = reachable
                .iter()
                .flat_map(scalars)
                .filter_map(as_text)
                .collect();
            desc.available_options = Some(present);
        }
        AttributeKind::Boolean => {
            desc.available_values = Some(reachable.iter().filter_map(as_bool).collect());
        }
        AttributeKind::Enum | AttributeKind::Varchar | AttributeKind::Date => {}
    }
    desc
}

fn values_of<'a>(code: &str, listings: impl Iterator<Item = &'a Listing>) -> Vec<Value> {
    listings.filter_map(|l| field_value(l, code)).collect()
}

fn extent(values: &[Value]) -> (Option<f64>, Option<f64>) {
    values
        .iter()
        .filter_map(as_number)
        .fold((None, None), |(min, max), v| {
            (
                Some(min.map_or(v, |m: f64| m.min(v))),
                Some(max.map_or(v, |m: f64| m.max(v))),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterValue;
    use crate::source::dataset::sample_dataset;

    fn set(values: Vec<FilterValue>) -> FilterSet {
        values.into_iter().collect()
    }

    #[test]
    fn range_is_inclusive() {
        let data = sample_dataset().unwrap();
        let filters = set(vec![FilterValue::new(
            "price",
            FilterPayload::Range(125000.0, 260000.0),
        )]);
        let page = search(&data.listings, &filters, 1, 20);
        let ids: Vec<i64> = page.data.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1008, 1004, 1002]);
    }

    #[test]
    fn multi_select_matches_any_member() {
        let data = sample_dataset().unwrap();
        let filters = set(vec![FilterValue::new(
            "district",
            FilterPayload::MultiSelect(vec!["Yunusabad".into(), "Mirzo-Ulugbek".into()]),
        )]);
        assert_eq!(search(&data.listings, &filters, 1, 20).total, 6);
    }

    #[test]
    fn combined_filters_intersect() {
        let data = sample_dataset().unwrap();
        let filters = set(vec![
            FilterValue::new("ad_type", FilterPayload::Text("Rent".into())),
            FilterValue::new("is_furnished", FilterPayload::Bool(true)),
        ]);
        let ids: Vec<i64> = search(&data.listings, &filters, 1, 20)
            .data
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![1012, 1006, 1003]);
    }

    #[test]
    fn missing_attribute_does_not_match() {
        let data = sample_dataset().unwrap();
        let filters = set(vec![FilterValue::new(
            "available_from",
            FilterPayload::DateRange("2024-06-01".into(), "2024-06-30".into()),
        )]);
        let ids: Vec<i64> = search(&data.listings, &filters, 1, 20)
            .data
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![1009, 1006, 1002]);
    }

    #[test]
    fn paging_is_one_based_with_ceiling_total() {
        let data = sample_dataset().unwrap();
        let first = search(&data.listings, &FilterSet::new(), 1, 5);
        assert_eq!(first.total, 12);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.data[0].id, 1012);

        let last = search(&data.listings, &FilterSet::new(), 3, 5);
        assert_eq!(last.data.len(), 2);

        let past = search(&data.listings, &FilterSet::new(), 9, 5);
        assert!(past.data.is_empty());
        assert_eq!(past.total, 12);

        assert_eq!(search(&data.listings, &FilterSet::new(), 0, 5).page, 1);
    }

    #[test]
    fn facets_exclude_own_filter() {
        let data = sample_dataset().unwrap();
        let applied = set(vec![FilterValue::new(
            "district",
            FilterPayload::MultiSelect(vec!["Yunusabad".into()]),
        )]);
        let catalog = catalog(&data.attributes, &data.listings, &applied);

        let district = catalog.iter().find(|d| d.code == "district").unwrap();
        assert_eq!(district.available_options.as_ref().unwrap().len(), 6);

        let building = catalog.iter().find(|d| d.code == "building_type").unwrap();
        let available: Vec<_> = building.available_options.as_ref().unwrap().iter().cloned().collect();
        assert_eq!(available, vec!["Brick", "Monolith", "Panel"]);

        let price = catalog.iter().find(|d| d.code == "price").unwrap();
        assert_eq!(price.min_value, Some(350.0));
        assert_eq!(price.max_value, Some(260000.0));
        assert_eq!(price.available_min_value, Some(900.0));
        assert_eq!(price.available_max_value, Some(98000.0));
    }

    #[test]
    fn boolean_facet_lists_reachable_values() {
        let data = sample_dataset().unwrap();
        let applied = set(vec![FilterValue::new(
            "district",
            FilterPayload::MultiSelect(vec!["Shaykhantakhur".into()]),
        )]);
        let catalog = catalog(&data.attributes, &data.listings, &applied);
        let furnished = catalog.iter().find(|d| d.code == "is_furnished").unwrap();
        let values: Vec<bool> = furnished.available_values.as_ref().unwrap().iter().copied().collect();
        assert_eq!(values, vec![true]);
    }

    #[test]
    fn null_and_empty_list_match_everything() {
        let data = sample_dataset().unwrap();
        let filters = set(vec![
            FilterValue::new("ad_type", FilterPayload::Null),
            FilterValue::new("district", FilterPayload::MultiSelect(vec![])),
        ]);
        assert_eq!(search(&data.listings, &filters, 1, 50).total, 12);
    }
}
