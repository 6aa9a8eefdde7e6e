use super::{CmdMessage, CmdResult};
use crate::source::ListingSource;
use log::error;

/// Loads one listing with its contact record. Not-found and source failures
/// both come back as a result without details.
pub fn run<S: ListingSource>(source: &S, id: i64) -> CmdResult {
    match source.listing_details(id) {
        Ok(Some(details)) => CmdResult {
            details: Some(details),
            ..CmdResult::default()
        },
        Ok(None) => CmdResult::default()
            .with_message(CmdMessage::warning(format!("Listing {} not found", id))),
        Err(e) => {
            error!("detail fetch for listing {} failed: {}", id, e);
            CmdResult::default()
                .with_message(CmdMessage::warning(format!("Could not load listing {}: {}", id, e)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures::SourceFixture;

    #[test]
    fn found_listing_has_details() {
        let fixture = SourceFixture::new().with_sample();
        let result = run(&fixture.source, 1006);
        let details = result.details.unwrap();
        assert_eq!(
            details.listing.external_url(),
            "https://www.olx.uz/d/obyavlenie/3-komnatnaya-arenda-centr-ID3xK6f"
        );
        assert_eq!(details.details.author_name.as_deref(), Some("Agency Uy-Joy"));
    }

    #[test]
    fn missing_and_failing_are_neutral() {
        let fixture = SourceFixture::new().with_sample();
        assert!(run(&fixture.source, 5).details.is_none());

        let failing = SourceFixture::new().with_sample().failing();
        let result = run(&failing.source, 1006);
        assert!(result.details.is_none());
        assert_eq!(result.messages.len(), 1);
    }
}
