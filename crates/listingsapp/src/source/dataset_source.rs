use super::backend::SourceBackend;
use super::dataset::Dataset;
use super::{query, ListingSource};
use crate::error::{ListingsError, Result};
use crate::filters::FilterSet;
use crate::model::{AttributeDescriptor, ContactInfo, ContactUpdate, ListingDetails, ListingPage};
use log::debug;

/// A [`ListingSource`] that answers queries from a dataset held by a backend.
///
/// Every call reloads what it needs from the backend, so edits made by another
/// process to the JSON files are picked up on the next query.
pub struct DatasetSource<B: SourceBackend> {
    pub(crate) backend: B,
}

impl<B: SourceBackend> DatasetSource<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replaces the whole dataset.
    pub fn import(&mut self, dataset: &Dataset) -> Result<()> {
        self.backend.save_attributes(&dataset.attributes)?;
        self.backend.save_listings(&dataset.listings)?;
        self.backend.save_contacts(&dataset.contacts)?;
        Ok(())
    }
}

impl<B: SourceBackend> ListingSource for DatasetSource<B> {
    fn attribute_catalog(
        &self,
        applied: &FilterSet,
        hint: Option<&str>,
    ) -> Result<Vec<AttributeDescriptor>> {
        let definitions = self.backend.load_attributes()?;
        let listings = self.backend.load_listings()?;
        debug!(
            "catalog for {} attributes, hint {:?}",
            definitions.len(),
            hint
        );
        Ok(query::catalog(&definitions, &listings, applied))
    }

    fn search_listings(&self, filters: &FilterSet, page: u32, page_size: u32) -> Result<ListingPage> {
        let listings = self.backend.load_listings()?;
        Ok(query::search(&listings, filters, page, page_size))
    }

    fn listing_details(&self, id: i64) -> Result<Option<ListingDetails>> {
        let listing = match self.backend.load_listings()?.into_iter().find(|l| l.id == id) {
            Some(listing) => listing,
            None => return Ok(None),
        };
        let details = self
            .backend
            .load_contacts()?
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(ListingDetails { listing, details }))
    }

    fn upsert_contact(&mut self, id: i64, update: &ContactUpdate) -> Result<ContactInfo> {
        if !self.backend.load_listings()?.iter().any(|l| l.id == id) {
            return Err(ListingsError::ListingNotFound(id));
        }
        let mut contacts = self.backend.load_contacts()?;
        let stored = contacts.get(&id).cloned().unwrap_or_default().merged(update);
        contacts.insert(id, stored.clone());
        self.backend.save_contacts(&contacts)?;
        Ok(stored)
    }
}
