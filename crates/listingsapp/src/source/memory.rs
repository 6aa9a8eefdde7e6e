use super::dataset_source::DatasetSource;
use super::mem_backend::MemBackend;

pub type InMemorySource = DatasetSource<MemBackend>;

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySource {
    pub fn new() -> Self {
        DatasetSource::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::Result;
    use crate::filters::FilterSet;
    use crate::model::{AttributeDescriptor, ContactInfo, ContactUpdate, ListingDetails, ListingPage};
    use crate::source::dataset::sample_dataset;
    use crate::source::ListingSource;
    use std::cell::RefCell;

    pub struct SourceFixture {
        pub source: InMemorySource,
    }

    impl Default for SourceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SourceFixture {
        pub fn new() -> Self {
            Self {
                source: InMemorySource::new(),
            }
        }

        pub fn with_sample(mut self) -> Self {
            let data = sample_dataset().unwrap();
            self.source.import(&data).unwrap();
            self
        }

        pub fn failing(self) -> Self {
            self.source.backend().set_simulate_read_error(true);
            self
        }

        pub fn recording(self) -> RecordingSource<InMemorySource> {
            RecordingSource::new(self.source)
        }
    }

    /// One call made through a [`RecordingSource`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum SourceCall {
        Catalog { applied: String, hint: Option<String> },
        Search { filters: String, page: u32, page_size: u32 },
        Details(i64),
        Upsert(i64),
    }

    /// Wraps a source and records every call, for asserting on refetches.
    pub struct RecordingSource<S: ListingSource> {
        pub inner: S,
        calls: RefCell<Vec<SourceCall>>,
    }

    impl<S: ListingSource> RecordingSource<S> {
        pub fn new(inner: S) -> Self {
            Self {
                inner,
                calls: RefCell::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<SourceCall> {
            self.calls.borrow().clone()
        }

        pub fn searches(&self) -> usize {
            self.count(|c| matches!(c, SourceCall::Search { .. }))
        }

        pub fn catalogs(&self) -> usize {
            self.count(|c| matches!(c, SourceCall::Catalog { .. }))
        }

        pub fn upserts(&self) -> usize {
            self.count(|c| matches!(c, SourceCall::Upsert(_)))
        }

        fn count(&self, pred: impl Fn(&SourceCall) -> bool) -> usize {
            self.calls.borrow().iter().filter(|c| pred(c)).count()
        }

        pub fn reset(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    impl<S: ListingSource> ListingSource for RecordingSource<S> {
        fn attribute_catalog(
            &self,
            applied: &FilterSet,
            hint: Option<&str>,
        ) -> Result<Vec<AttributeDescriptor>> {
            self.calls.borrow_mut().push(SourceCall::Catalog {
                applied: applied.to_json(),
                hint: hint.map(str::to_string),
            });
            self.inner.attribute_catalog(applied, hint)
        }

        fn search_listings(&self, filters: &FilterSet, page: u32, page_size: u32) -> Result<ListingPage> {
            self.calls.borrow_mut().push(SourceCall::Search {
                filters: filters.to_json(),
                page,
                page_size,
            });
            self.inner.search_listings(filters, page, page_size)
        }

        fn listing_details(&self, id: i64) -> Result<Option<ListingDetails>> {
            self.calls.borrow_mut().push(SourceCall::Details(id));
            self.inner.listing_details(id)
        }

        fn upsert_contact(&mut self, id: i64, update: &ContactUpdate) -> Result<ContactInfo> {
            self.calls.borrow_mut().push(SourceCall::Upsert(id));
            self.inner.upsert_contact(id, update)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::SourceFixture;
    use crate::error::ListingsError;
    use crate::filters::FilterSet;
    use crate::model::ContactUpdate;
    use crate::source::ListingSource;

    #[test]
    fn empty_source_has_no_listings() {
        let source = super::InMemorySource::new();
        let page = source.search_listings(&FilterSet::new(), 1, 20).unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn details_join_contacts() {
        let fixture = SourceFixture::new().with_sample();
        let details = fixture.source.listing_details(1004).unwrap().unwrap();
        assert_eq!(details.listing.id, 1004);
        assert_eq!(details.details.author_name.as_deref(), Some("Malika"));

        let bare = fixture.source.listing_details(1002).unwrap().unwrap();
        assert_eq!(bare.details, Default::default());

        assert!(fixture.source.listing_details(42).unwrap().is_none());
    }

    #[test]
    fn upsert_is_idempotent() {
        let mut fixture = SourceFixture::new().with_sample();
        let update = ContactUpdate {
            notes: Some("Owner abroad until June".into()),
            ..Default::default()
        };
        let first = fixture.source.upsert_contact(1001, &update).unwrap();
        let second = fixture.source.upsert_contact(1001, &update).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.author_name.as_deref(), Some("Dilshod"));
    }

    #[test]
    fn upsert_unknown_listing_fails() {
        let mut fixture = SourceFixture::new().with_sample();
        let err = fixture
            .source
            .upsert_contact(7, &ContactUpdate::default())
            .unwrap_err();
        assert!(matches!(err, ListingsError::ListingNotFound(7)));
    }

    #[test]
    fn write_error_keeps_previous_contacts() {
        let mut fixture = SourceFixture::new().with_sample();
        fixture.source.backend().set_simulate_write_error(true);
        let update = ContactUpdate {
            author_name: Some("Someone else".into()),
            ..Default::default()
        };
        assert!(fixture.source.upsert_contact(1001, &update).is_err());

        fixture.source.backend().set_simulate_write_error(false);
        let details = fixture.source.listing_details(1001).unwrap().unwrap();
        assert_eq!(details.details.author_name.as_deref(), Some("Dilshod"));
    }

    #[test]
    fn read_error_surfaces_as_source_error() {
        let fixture = SourceFixture::new().with_sample().failing();
        let err = fixture
            .source
            .search_listings(&FilterSet::new(), 1, 20)
            .unwrap_err();
        assert!(matches!(err, ListingsError::Source(_)));
    }
}
