use super::{CmdMessage, CmdResult};
use crate::availability::{RefreshOutcome, RefreshTicket};
use crate::error::Result;
use crate::filters::FilterSet;
use crate::model::AttributeDescriptor;
use crate::session::BrowserSession;
use crate::source::ListingSource;

/// Starts a refresh scoped to `scope`, superseding any earlier ticket.
pub fn begin(session: &mut BrowserSession, scope: &FilterSet) -> RefreshTicket {
    let hint = session.hint.clone();
    session.refresher.begin(scope, hint.as_deref())
}

/// Delivers a catalog response. Stale tickets are dropped, failures leave the
/// catalog as it was.
pub fn complete(
    session: &mut BrowserSession,
    ticket: &RefreshTicket,
    response: Result<Vec<AttributeDescriptor>>,
) -> CmdResult {
    let outcome = session
        .refresher
        .complete(ticket, response, &mut session.catalog);

    let mut result = CmdResult::default();
    match &outcome {
        RefreshOutcome::Merged { .. } => {
            session.ensure_widgets();
            session.sync_widgets();
        }
        RefreshOutcome::Stale { .. } => {}
        RefreshOutcome::Failed { reason } => {
            result.add_message(CmdMessage::warning(format!(
                "Could not refresh filter options: {}",
                reason
            )));
        }
    }
    result.refresh = Some(outcome);
    result
}

/// A full round trip against `source`.
pub fn run<S: ListingSource>(source: &S, session: &mut BrowserSession, scope: &FilterSet) -> CmdResult {
    let ticket = begin(session, scope);
    let response = source.attribute_catalog(&ticket.scope, ticket.hint.as_deref());
    complete(session, &ticket, response)
}
