//! # Listing Sources
//!
//! Everything the filter panel shows comes from a [`ListingSource`]: the
//! attribute catalog, filtered listing pages, single-listing details and the
//! contact-info upsert. The trait is the seam to the remote listings database;
//! the rest of the crate never knows how queries are answered.
//!
//! ## Failure Policy
//!
//! Sources return `Err` freely. Callers in the command layer catch those
//! errors, log them, and degrade to a neutral result (empty page, unchanged
//! catalog, no details) so a flaky network never takes the UI down.
//!
//! ## Implementations
//!
//! [`DatasetSource`] answers queries locally from a [`Dataset`] held by a
//! [`SourceBackend`]:
//!
//! - [`fs::FileSource`]: JSON files in a data directory (`attributes.json`,
//!   `listings.json`, `contacts.json`). Used by the CLI.
//! - [`memory::InMemorySource`]: `RefCell` storage with error simulation.
//!   Used by tests; see [`memory::fixtures`] for builders and a call-recording
//!   wrapper.
//!
//! The query semantics (matching, paging, facets) live in [`query`].

use crate::error::Result;
use crate::filters::FilterSet;
use crate::model::{AttributeDescriptor, ContactInfo, ContactUpdate, ListingDetails, ListingPage};

pub mod backend;
pub mod dataset;
pub mod dataset_source;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod query;

pub use backend::SourceBackend;
pub use dataset::{sample_dataset, Dataset};
pub use dataset_source::DatasetSource;

pub trait ListingSource {
    /// Attribute descriptors with availability scoped to `applied`. `hint`
    /// names the attribute the user last interacted with, if any.
    fn attribute_catalog(
        &self,
        applied: &FilterSet,
        hint: Option<&str>,
    ) -> Result<Vec<AttributeDescriptor>>;

    /// One 1-based page of listings matching `filters`.
    fn search_listings(&self, filters: &FilterSet, page: u32, page_size: u32) -> Result<ListingPage>;

    /// `Ok(None)` when no listing has this id.
    fn listing_details(&self, id: i64) -> Result<Option<ListingDetails>>;

    /// Upserts by listing id and returns the stored record. Safe to retry.
    fn upsert_contact(&mut self, id: i64, update: &ContactUpdate) -> Result<ContactInfo>;
}
