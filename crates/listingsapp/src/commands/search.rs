use super::{CmdMessage, CmdResult};
use crate::filters::FilterSet;
use crate::model::ListingPage;
use crate::session::BrowserSession;
use crate::source::ListingSource;
use log::error;

/// Queries one page. A failing source yields an empty page and a warning.
pub fn run<S: ListingSource>(source: &S, filters: &FilterSet, page: u32, page_size: u32) -> CmdResult {
    match source.search_listings(filters, page, page_size) {
        Ok(listings) => CmdResult::default().with_listings(listings),
        Err(e) => {
            error!("listing search failed: {}", e);
            CmdResult::default()
                .with_listings(ListingPage::empty(page, page_size))
                .with_message(CmdMessage::warning(format!("Could not load listings: {}", e)))
        }
    }
}

/// Fetches `page` for the applied filters and stores it in the session.
pub fn fetch<S: ListingSource>(source: &S, session: &mut BrowserSession, page: u32) -> CmdResult {
    let page = page.max(1);
    let result = run(source, session.store.applied(), page, session.page_size);
    session.page = page;
    if let Some(listings) = &result.listings {
        session.listings = listings.clone();
    }
    result
}

pub fn go_to_page<S: ListingSource>(source: &S, session: &mut BrowserSession, page: u32) -> CmdResult {
    let mut result = fetch(source, session, page);
    let total_pages = session.listings.total_pages;
    if total_pages > 0 && page > total_pages {
        result.add_message(CmdMessage::info(format!(
            "Page {} is past the last page ({})",
            page, total_pages
        )));
    }
    result
}
