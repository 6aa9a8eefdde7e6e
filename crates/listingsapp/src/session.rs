//! # Browser Session
//!
//! All state of one filter panel, owned by value: the filter store, the page
//! location, the attribute catalog and its refresher, one widget per panel
//! attribute, the current listing page and the open contact editor.
//!
//! Nothing here is global. Two sessions are two independent panels.
//!
//! The session performs no queries. Commands read and mutate it, and call the
//! source when a committed change needs a refetch or refresh.

use crate::availability::{AttributeCatalog, AvailabilityRefresher};
use crate::config::ListingsConfig;
use crate::contact::ContactEditor;
use crate::filters::{FilterChip, FilterSet, FilterStore};
use crate::filters::label::chip;
use crate::model::ListingPage;
use crate::url::PageLocation;
use crate::widgets::{Widget, WidgetView};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

pub struct BrowserSession {
    pub(crate) store: FilterStore,
    pub(crate) location: PageLocation,
    pub(crate) navigations: u32,
    pub(crate) catalog: AttributeCatalog,
    pub(crate) refresher: AvailabilityRefresher,
    pub(crate) widgets: IndexMap<String, Widget>,
    pub(crate) hint: Option<String>,
    pub(crate) page: u32,
    pub(crate) listings: ListingPage,
    pub(crate) contact: Option<ContactEditor>,
    pub(crate) panel_attributes: Vec<String>,
    pub(crate) page_size: u32,
}

/// Snapshot of the panel for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelStatus {
    pub location: String,
    pub applied: FilterSet,
    pub pending: FilterSet,
    pub has_unsaved_changes: bool,
    pub can_apply: bool,
    pub can_reset: bool,
    pub chips: Vec<FilterChip>,
    pub widgets: Vec<WidgetState>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetState {
    pub code: String,
    pub name: String,
    pub view: WidgetView,
}

impl BrowserSession {
    pub fn new(location: PageLocation, config: &ListingsConfig) -> Self {
        let store = FilterStore::from_applied(location.filters());
        debug!("session opened at {} with {} filters", location, store.applied().len());
        Self {
            store,
            location,
            navigations: 0,
            catalog: AttributeCatalog::new(),
            refresher: AvailabilityRefresher::new(),
            widgets: IndexMap::new(),
            hint: None,
            page: 1,
            listings: ListingPage::empty(1, config.page_size),
            contact: None,
            panel_attributes: config.panel_attributes.clone(),
            page_size: config.page_size,
        }
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }

    /// How many times the location was replaced since the session opened.
    pub fn navigations(&self) -> u32 {
        self.navigations
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    pub fn listings(&self) -> &ListingPage {
        &self.listings
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn contact_editor(&self) -> Option<&ContactEditor> {
        self.contact.as_ref()
    }

    /// Replaces the location with one encoding `applied`.
    pub(crate) fn navigate(&mut self, applied: &FilterSet) {
        self.location = self.location.with_filters(applied);
        self.navigations += 1;
        debug!("navigated to {}", self.location);
    }

    /// Codes shown in the panel, in display order. Configured codes missing
    /// from the catalog are skipped; an empty configuration shows everything.
    pub fn panel_codes(&self) -> Vec<String> {
        if self.panel_attributes.is_empty() {
            return self.catalog.codes().map(str::to_string).collect();
        }
        self.panel_attributes
            .iter()
            .filter(|code| self.catalog.get(code).is_some())
            .cloned()
            .collect()
    }

    /// Creates widgets for panel attributes that have none yet. Existing
    /// widgets are kept, with whatever local edit state they hold.
    pub(crate) fn ensure_widgets(&mut self) {
        for code in self.panel_codes() {
            if self.widgets.contains_key(&code) {
                continue;
            }
            let widget = self
                .catalog
                .get(&code)
                .and_then(|attr| Widget::for_attribute(attr, self.store.pending()));
            if let Some(widget) = widget {
                self.widgets.insert(code, widget);
            }
        }
    }

    pub(crate) fn sync_widgets(&mut self) {
        let pending = self.store.pending().clone();
        for widget in self.widgets.values_mut() {
            widget.sync(&pending);
        }
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        self.store
            .applied()
            .iter()
            .map(|fv| {
                let name = self.catalog.get(&fv.attribute_code).map(|a| a.name.as_str());
                chip(fv, name)
            })
            .collect()
    }

    pub fn status(&self) -> PanelStatus {
        let pending = self.store.pending();
        let widgets = self
            .panel_codes()
            .into_iter()
            .filter_map(|code| {
                let widget = self.widgets.get(&code)?;
                let attr = self.catalog.get(&code)?;
                Some(WidgetState {
                    code,
                    name: attr.name.clone(),
                    view: widget.view(attr, pending),
                })
            })
            .collect();

        PanelStatus {
            location: self.location.to_string(),
            applied: self.store.applied().clone(),
            pending: pending.clone(),
            has_unsaved_changes: self.store.has_unsaved_changes(),
            can_apply: self.store.can_apply(),
            can_reset: self.store.can_reset(),
            chips: self.chips(),
            widgets,
        }
    }
}
