//! # Attribute Availability Refresh
//!
//! Keeps each descriptor's dataset-scoped fields current with the *applied*
//! filters, so narrowing one attribute narrows the options shown for the others.
//!
//! ## When
//!
//! Once on mount with an empty scope, then after every apply or clear that
//! actually committed. Never on pending edits.
//!
//! ## Ordering
//!
//! Catalog requests may complete out of order. Each request takes a
//! [`RefreshTicket`] carrying a generation number; only the ticket from the
//! latest [`AvailabilityRefresher::begin`] may merge. Older responses are
//! reported as [`RefreshOutcome::Stale`] and dropped.
//!
//! ## Merge
//!
//! The catalog is never replaced. For each returned descriptor:
//!
//! - known code: only `options`, `available_options`, `available_min_value`,
//!   `available_max_value` and `available_values` are overwritten;
//! - new code: the descriptor is inserted.
//!
//! Descriptors missing from the response are left exactly as they were. A
//! failed request is logged and leaves the catalog untouched.

use crate::error::Result;
use crate::filters::FilterSet;
use crate::model::AttributeDescriptor;
use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

/// Descriptors keyed by attribute code, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttributeCatalog {
    entries: IndexMap<String, AttributeDescriptor>,
}

impl AttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<&AttributeDescriptor> {
        self.entries.get(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.entries.values()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `(updated, added)` counts.
    pub fn merge(&mut self, incoming: Vec<AttributeDescriptor>) -> (usize, usize) {
        let mut updated = 0;
        let mut added = 0;
        for desc in incoming {
            match self.entries.get_mut(&desc.code) {
                Some(existing) => {
                    existing.options = desc.options;
                    existing.available_options = desc.available_options;
                    existing.available_min_value = desc.available_min_value;
                    existing.available_max_value = desc.available_max_value;
                    existing.available_values = desc.available_values;
                    updated += 1;
                }
                None => {
                    self.entries.insert(desc.code.clone(), desc);
                    added += 1;
                }
            }
        }
        (updated, added)
    }
}

impl FromIterator<AttributeDescriptor> for AttributeCatalog {
    fn from_iter<I: IntoIterator<Item = AttributeDescriptor>>(iter: I) -> Self {
        let mut catalog = AttributeCatalog::new();
        catalog.merge(iter.into_iter().collect());
        catalog
    }
}

/// Identifies one catalog request and the applied snapshot it was scoped to.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshTicket {
    pub generation: u64,
    pub scope: FilterSet,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Merged { updated: usize, added: usize },
    Stale { generation: u64, latest: u64 },
    Failed { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct AvailabilityRefresher {
    latest: u64,
}

impl AvailabilityRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Starts a request scoped to `applied`, superseding any in flight.
    pub fn begin(&mut self, applied: &FilterSet, hint: Option<&str>) -> RefreshTicket {
        self.latest += 1;
        debug!(
            "availability refresh #{} scoped to {}",
            self.latest,
            applied.to_json()
        );
        RefreshTicket {
            generation: self.latest,
            scope: applied.clone(),
            hint: hint.map(str::to_string),
        }
    }

    pub fn complete(
        &mut self,
        ticket: &RefreshTicket,
        response: Result<Vec<AttributeDescriptor>>,
        catalog: &mut AttributeCatalog,
    ) -> RefreshOutcome {
        if ticket.generation != self.latest {
            debug!(
                "dropping stale availability response #{} (latest #{})",
                ticket.generation, self.latest
            );
            return RefreshOutcome::Stale {
                generation: ticket.generation,
                latest: self.latest,
            };
        }
        match response {
            Ok(descriptors) => {
                let (updated, added) = catalog.merge(descriptors);
                RefreshOutcome::Merged { updated, added }
            }
            Err(e) => {
                warn!("availability refresh #{} failed: {}", ticket.generation, e);
                RefreshOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
