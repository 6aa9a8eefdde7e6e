use listingsapp::api::ListingsApi;
use listingsapp::availability::RefreshOutcome;
use listingsapp::config::ListingsConfig;
use listingsapp::error::Result;
use listingsapp::filters::FilterSet;
use listingsapp::model::{
    AttributeDescriptor, ContactInfo, ContactUpdate, FilterPayload, FilterValue, ListingDetails,
    ListingPage,
};
use listingsapp::source::memory::InMemorySource;
use listingsapp::source::{sample_dataset, ListingSource};
use listingsapp::widgets::WidgetAction;
use std::cell::Cell;

/// Counts the queries an operation makes.
struct Counted {
    inner: InMemorySource,
    searches: Cell<usize>,
    catalogs: Cell<usize>,
}

impl ListingSource for Counted {
    fn attribute_catalog(&self, applied: &FilterSet, hint: Option<&str>) -> Result<Vec<AttributeDescriptor>> {
        self.catalogs.set(self.catalogs.get() + 1);
        self.inner.attribute_catalog(applied, hint)
    }

    fn search_listings(&self, filters: &FilterSet, page: u32, page_size: u32) -> Result<ListingPage> {
        self.searches.set(self.searches.get() + 1);
        self.inner.search_listings(filters, page, page_size)
    }

    fn listing_details(&self, id: i64) -> Result<Option<ListingDetails>> {
        self.inner.listing_details(id)
    }

    fn upsert_contact(&mut self, id: i64, update: &ContactUpdate) -> Result<ContactInfo> {
        self.inner.upsert_contact(id, update)
    }
}

fn setup(url: &str) -> ListingsApi<Counted> {
    let mut inner = InMemorySource::new();
    inner.import(&sample_dataset().unwrap()).unwrap();
    let source = Counted {
        inner,
        searches: Cell::new(0),
        catalogs: Cell::new(0),
    };
    let mut api = ListingsApi::open(source, url, ListingsConfig::default());
    api.mount();
    api
}

fn queries(api: &ListingsApi<Counted>) -> (usize, usize) {
    (api.source().searches.get(), api.source().catalogs.get())
}

#[test]
fn price_range_apply_scenario() {
    let mut api = setup("/en/listings");
    api.interact("price", WidgetAction::EditMin("100000".into())).unwrap();
    api.interact("price", WidgetAction::EditMax("300000".into())).unwrap();
    assert!(api.can_apply());

    let before = queries(&api);
    let result = api.apply_filters();

    assert_eq!(api.session().store().applied(), api.session().store().pending());
    assert!(api.location().contains("filter_price=%5B100000%2C300000%5D"));
    assert_eq!(queries(&api), (before.0 + 1, before.1 + 1));
    assert!(matches!(result.refresh, Some(RefreshOutcome::Merged { .. })));
    assert!(!api.can_apply());
}

#[test]
fn district_url_decodes_to_multi_select() {
    let api = setup("/en/listings?filter_district=%5B%22Yunusabad%22%2C%22Mirzo-Ulugbek%22%5D");
    let applied = api.session().store().applied();
    assert_eq!(
        applied.to_json(),
        r#"[{"attributeCode":"district","value":["Yunusabad","Mirzo-Ulugbek"]}]"#
    );
    assert_eq!(api.session().listings().total, 6);
}

#[test]
fn clear_when_nothing_applied_is_silent() {
    let mut api = setup("/en/listings?sort=new");
    api.interact("ad_type", WidgetAction::Toggle("Sale".into())).unwrap();
    let before = queries(&api);

    let result = api.clear_filters();
    assert!(result.location.is_none());
    assert_eq!(queries(&api), before);
    assert_eq!(api.session().navigations(), 0);
    assert!(!api.can_reset());
}

#[test]
fn repeated_apply_clear_cycles_do_not_accumulate_params() {
    let mut api = setup("/ru/listings?view=grid");
    for rooms in ["2", "3", "4"] {
        api.interact("number_of_rooms", WidgetAction::EditMin(rooms.into())).unwrap();
        api.interact("number_of_rooms", WidgetAction::EditMax(rooms.into())).unwrap();
        api.apply_filters();
        api.clear_filters();
    }
    assert_eq!(api.location(), "/ru/listings?view=grid");
    assert_eq!(api.session().navigations(), 6);
}

#[test]
fn boolean_toggle_twice_unsets() {
    let mut api = setup("/en/listings");
    api.set_filter(FilterValue::new("is_furnished", FilterPayload::Bool(true)));
    api.interact("is_furnished", WidgetAction::Set(true)).unwrap();
    assert!(!api.session().store().pending().contains("is_furnished"));
}

#[test]
fn narrowing_one_filter_narrows_the_others() {
    let mut api = setup("/en/listings");
    api.interact("ad_type", WidgetAction::Toggle("Rent".into())).unwrap();
    api.apply_filters();

    let district = api.catalog().get("district").unwrap();
    let available: Vec<_> = district.available_options.clone().unwrap().into_iter().collect();
    assert_eq!(available, vec!["Chilanzar", "Yakkasaray", "Yunusabad"]);

    // Unavailable now, so selecting it is refused.
    let result = api
        .interact("district", WidgetAction::Toggle("Sergeli".into()))
        .unwrap();
    assert!(result.interaction.is_none());
}

#[test]
fn one_sided_range_edit_survives_refresh() {
    let mut api = setup("/en/listings");
    let typed = api
        .interact("total_area", WidgetAction::EditMin("50".into()))
        .unwrap();
    assert!(typed.interaction.is_some());
    assert_eq!(api.session().hint(), Some("total_area"));
    assert!(api.session().store().pending().is_empty());

    api.interact("ad_type", WidgetAction::Toggle("Sale".into())).unwrap();
    let ticket = api.begin_refresh();
    let response = api.source().attribute_catalog(&ticket.scope, None);
    api.complete_refresh(&ticket, response);

    let panel = api.status();
    let area = panel.widgets.iter().find(|w| w.code == "total_area").unwrap();
    assert!(matches!(
        &area.view,
        listingsapp::widgets::WidgetView::Range { min_text, max_text, .. }
            if min_text == "50" && max_text.is_empty()
    ));

    api.interact("total_area", WidgetAction::FinishRange).unwrap();
    assert_eq!(
        api.session().store().pending().get("total_area"),
        Some(&FilterPayload::Range(50.0, 165.0))
    );
}

#[test]
fn stale_refresh_is_discarded_at_the_api() {
    let mut api = setup("/en/listings");
    let first = api.begin_refresh();
    api.set_filter(FilterValue::new("ad_type", FilterPayload::Text("Rent".into())));
    api.apply_filters();
    let newest = api.catalog().get("price").cloned();

    let response = api.source().attribute_catalog(&first.scope, None);
    let result = api.complete_refresh(&first, response);
    assert!(matches!(result.refresh, Some(RefreshOutcome::Stale { .. })));
    assert_eq!(api.catalog().get("price").cloned(), newest);
}

#[test]
fn pagination_and_details() {
    let mut api = setup("/en/listings");
    let page = api.go_to_page(2).listings.unwrap();
    assert_eq!(page.page, 2);
    assert!(page.data.is_empty());
    assert_eq!(page.total, 12);

    let details = api.listing_details(1004).details.unwrap();
    assert_eq!(details.details.notes.as_deref(), Some("Viewing on weekends only"));
}

#[test]
fn contact_edit_round_trip() {
    let mut api = setup("/en/listings");
    api.open_contact_editor(1003);
    api.edit_contact(&ContactUpdate {
        author_phone: Some("+998 97 000 11 22".into()),
        ..Default::default()
    })
    .unwrap();
    let saved = api.save_contact().unwrap().contact.unwrap();
    assert_eq!(saved.author_phone.as_deref(), Some("+998 97 000 11 22"));

    api.close_contact_editor();
    assert!(api.save_contact().is_err());
    let reloaded = api.listing_details(1003).details.unwrap();
    assert_eq!(reloaded.details, saved);
}

#[test]
fn host_query_change_survives_next_apply() {
    let mut api = setup("/en/listings?sort=new");
    api.location_changed("/en/listings?sort=price");

    api.set_filter(FilterValue::new("ad_type", FilterPayload::Text("Rent".into())));
    api.apply_filters();
    assert_eq!(api.location(), "/en/listings?sort=price&filter_ad_type=Rent");
}

#[test]
fn back_navigation_restores_filters_from_url() {
    let mut api = setup("/en/listings");
    api.set_filter(FilterValue::new("ad_type", FilterPayload::Text("Rent".into())));
    api.apply_filters();
    assert_eq!(api.session().listings().total, 4);
    let navigations = api.session().navigations();

    api.location_changed("/en/listings");
    assert!(api.session().store().applied().is_empty());
    assert!(api.session().store().pending().is_empty());
    assert_eq!(api.session().listings().total, 12);
    assert_eq!(api.session().navigations(), navigations);
}
