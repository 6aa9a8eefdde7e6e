use super::CmdResult;
use crate::session::BrowserSession;

pub fn run(session: &BrowserSession) -> CmdResult {
    CmdResult {
        panel: Some(session.status()),
        listings: Some(session.listings().clone()),
        ..CmdResult::default()
    }
}
