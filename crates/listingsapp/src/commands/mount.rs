use super::{refresh, search, CmdResult};
use crate::filters::{FilterSet, FilterStore};
use crate::session::BrowserSession;
use crate::source::ListingSource;
use crate::url::PageLocation;
use log::debug;

/// First load of a session whose filters were decoded from its URL: an
/// unscoped availability refresh, then page 1 for the applied filters.
pub fn run<S: ListingSource>(source: &S, session: &mut BrowserSession) -> CmdResult {
    let refreshed = refresh::run(source, session, &FilterSet::new());
    let listed = search::fetch(source, session, 1);
    refreshed.merge(listed)
}

/// The host moved to `location` on its own (back navigation, another control
/// editing the query). Non-filter parameters are taken as they are. When the
/// decoded filters differ from `applied`, both applied and pending are reset
/// to them, followed by a refetch and a refresh scoped to the new set.
pub fn location_changed<S: ListingSource>(
    source: &S,
    session: &mut BrowserSession,
    location: PageLocation,
) -> CmdResult {
    let decoded = location.filters();
    session.location = location;
    if decoded.content_eq(session.store.applied()) {
        return CmdResult::default();
    }

    debug!("location carries new filters, resetting to {}", decoded.to_json());
    session.store = FilterStore::from_applied(decoded.clone());
    session.sync_widgets();
    let listed = search::fetch(source, session, 1);
    listed.merge(refresh::run(source, session, &decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListingsConfig;
    use crate::model::{FilterPayload, FilterValue};
    use crate::source::memory::fixtures::{SourceCall, SourceFixture};
    use crate::url::PageLocation;

    #[test]
    fn mount_refreshes_unscoped_and_searches_applied() {
        let source = SourceFixture::new().with_sample().recording();
        let location = PageLocation::parse(
            "/en/listings?filter_district=%5B%22Yunusabad%22%2C%22Mirzo-Ulugbek%22%5D",
        );
        let mut session = BrowserSession::new(location, &ListingsConfig::default());
        let result = run(&source, &mut session);

        let calls = source.calls();
        assert_eq!(
            calls[0],
            SourceCall::Catalog {
                applied: "[]".into(),
                hint: None
            }
        );
        assert!(matches!(&calls[1], SourceCall::Search { page: 1, .. }));
        assert_eq!(result.listings.unwrap().total, 6);
        assert_eq!(session.navigations(), 0);
        assert!(!session.store().has_unsaved_changes());
    }

    #[test]
    fn location_change_keeps_edits_when_filters_match() {
        let source = SourceFixture::new().with_sample().recording();
        let location = PageLocation::parse("/en/listings?sort=new&filter_ad_type=Rent");
        let mut session = BrowserSession::new(location, &ListingsConfig::default());
        run(&source, &mut session);
        session
            .store
            .set_filter(FilterValue::new("is_furnished", FilterPayload::Bool(true)));
        source.reset();

        let result = location_changed(
            &source,
            &mut session,
            PageLocation::parse("/en/listings?sort=price&filter_ad_type=Rent"),
        );
        assert!(source.calls().is_empty());
        assert!(result.listings.is_none());
        assert_eq!(session.location().params.get("sort"), Some("price"));
        assert!(session.store().pending().contains("is_furnished"));
        assert_eq!(session.navigations(), 0);
    }

    #[test]
    fn location_change_with_new_filters_resets_both_sets() {
        let source = SourceFixture::new().with_sample().recording();
        let mut session =
            BrowserSession::new(PageLocation::parse("/en/listings"), &ListingsConfig::default());
        run(&source, &mut session);
        session
            .store
            .set_filter(FilterValue::new("is_furnished", FilterPayload::Bool(true)));
        source.reset();

        let result = location_changed(
            &source,
            &mut session,
            PageLocation::parse("/en/listings?filter_ad_type=Rent"),
        );
        assert_eq!(result.listings.unwrap().total, 4);
        assert_eq!(
            source.calls()[1],
            SourceCall::Catalog {
                applied: r#"[{"attributeCode":"ad_type","value":"Rent"}]"#.into(),
                hint: None
            }
        );
        assert!(!session.store().has_unsaved_changes());
        assert!(!session.store().pending().contains("is_furnished"));
        assert_eq!(session.navigations(), 0);
    }
}
