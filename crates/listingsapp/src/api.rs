//! # API Facade
//!
//! [`ListingsApi`] is the single entry point for UI clients. It owns one
//! [`ListingSource`] and one [`BrowserSession`] and dispatches each operation
//! to the command layer.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the matching `commands::*` function
//! - **Validates inputs** at the boundary (unknown attribute codes, actions
//!   sent to the wrong kind of widget)
//! - **Returns structured types** (`CmdResult`, `PanelStatus`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, stderr or file formatting
//!
//! ## Lifecycle
//!
//! ```text
//! ListingsApi::open(source, url, config)   decode URL -> applied = pending
//!   .mount()                               unscoped refresh + page 1
//!   .interact("price", EditMin("100000"))  pending edits, no queries
//!   .apply_filters()                       URL rewrite + refetch + refresh
//!   .location_changed(url)                 host navigated; re-read the URL
//! ```
//!
//! ## Asynchronous Hosts
//!
//! `apply_filters` and friends run the availability refresh synchronously.
//! A host that issues catalog requests itself can use [`ListingsApi::begin_refresh`]
//! and [`ListingsApi::complete_refresh`]; responses may arrive in any order and
//! only the newest ticket is merged.
//!
//! ## Generic Over ListingSource
//!
//! - Production: `ListingsApi<FileSource>`
//! - Testing: `ListingsApi<InMemorySource>`, or a `RecordingSource` wrapper to
//!   assert on the queries an operation made

use crate::availability::{AttributeCatalog, RefreshTicket};
use crate::commands::{self, CmdResult};
use crate::config::ListingsConfig;
use crate::error::Result;
use crate::model::{AttributeDescriptor, ContactUpdate, FilterValue};
use crate::session::{BrowserSession, PanelStatus};
use crate::source::ListingSource;
use crate::url::PageLocation;
use crate::widgets::WidgetAction;

pub struct ListingsApi<S: ListingSource> {
    source: S,
    session: BrowserSession,
    config: ListingsConfig,
}

impl<S: ListingSource> ListingsApi<S> {
    /// Opens a session at `url`. A location without a locale segment gets the
    /// configured one. No queries are made until [`ListingsApi::mount`].
    pub fn open(source: S, url: &str, config: ListingsConfig) -> Self {
        let location = resolve_location(url, &config);
        let session = BrowserSession::new(location, &config);
        Self {
            source,
            session,
            config,
        }
    }

    pub fn mount(&mut self) -> CmdResult {
        commands::mount::run(&self.source, &mut self.session)
    }

    /// Reports a location the host moved to by itself, such as back
    /// navigation or another control rewriting the query. Later rewrites
    /// start from this location's parameters.
    pub fn location_changed(&mut self, url: &str) -> CmdResult {
        let location = resolve_location(url, &self.config);
        commands::mount::location_changed(&self.source, &mut self.session, location)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    pub fn config(&self) -> &ListingsConfig {
        &self.config
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        self.session.catalog()
    }

    pub fn location(&self) -> String {
        self.session.location().to_string()
    }

    // --- Filters ---

    pub fn set_filter(&mut self, fv: FilterValue) -> CmdResult {
        commands::filters::set_filter(&mut self.session, fv)
    }

    pub fn remove_filter(&mut self, code: &str) -> CmdResult {
        commands::filters::remove_filter(&mut self.session, code)
    }

    pub fn interact(&mut self, code: &str, action: WidgetAction) -> Result<CmdResult> {
        commands::filters::interact(&mut self.session, code, action)
    }

    pub fn apply_filters(&mut self) -> CmdResult {
        commands::filters::apply(&self.source, &mut self.session)
    }

    pub fn clear_filters(&mut self) -> CmdResult {
        commands::filters::clear(&self.source, &mut self.session)
    }

    pub fn remove_applied_filter(&mut self, code: &str) -> CmdResult {
        commands::filters::remove_applied(&self.source, &mut self.session, code)
    }

    pub fn can_apply(&self) -> bool {
        self.session.store().can_apply()
    }

    pub fn can_reset(&self) -> bool {
        self.session.store().can_reset()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.session.store().has_unsaved_changes()
    }

    pub fn status(&self) -> PanelStatus {
        self.session.status()
    }

    pub fn status_result(&self) -> CmdResult {
        commands::status::run(&self.session)
    }

    // --- Availability ---

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        let applied = self.session.store().applied().clone();
        commands::refresh::begin(&mut self.session, &applied)
    }

    pub fn complete_refresh(
        &mut self,
        ticket: &RefreshTicket,
        response: Result<Vec<AttributeDescriptor>>,
    ) -> CmdResult {
        commands::refresh::complete(&mut self.session, ticket, response)
    }

    // --- Listings ---

    pub fn go_to_page(&mut self, page: u32) -> CmdResult {
        commands::search::go_to_page(&self.source, &mut self.session, page)
    }

    pub fn listing_details(&self, id: i64) -> CmdResult {
        commands::details::run(&self.source, id)
    }

    // --- Contact editing ---

    pub fn open_contact_editor(&mut self, id: i64) -> CmdResult {
        commands::contact::open(&self.source, &mut self.session, id)
    }

    pub fn edit_contact(&mut self, update: &ContactUpdate) -> Result<CmdResult> {
        commands::contact::edit(&mut self.session, update)
    }

    pub fn save_contact(&mut self) -> Result<CmdResult> {
        commands::contact::save(&mut self.source, &mut self.session)
    }

    pub fn close_contact_editor(&mut self) {
        commands::contact::close(&mut self.session)
    }

    // --- Locale ---

    /// Switches the locale segment, keeping path and query.
    pub fn switch_locale(&mut self, locale: &str) -> String {
        self.session.location = self.session.location.with_locale(locale);
        self.session.navigations += 1;
        self.session.location.to_string()
    }
}

/// Parses `url`, filling in the configured locale and listings path when absent.
fn resolve_location(url: &str, config: &ListingsConfig) -> PageLocation {
    let mut location = PageLocation::parse(url);
    if location.locale.is_none() {
        location.locale = Some(config.locale.clone());
    }
    if location.path == "/" {
        location.path = config.home().path;
    }
    location
}
