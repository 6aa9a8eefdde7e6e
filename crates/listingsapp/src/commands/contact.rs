use super::{details, CmdMessage, CmdResult};
use crate::contact::ContactEditor;
use crate::error::{ListingsError, Result};
use crate::model::ContactUpdate;
use crate::session::BrowserSession;
use crate::source::ListingSource;
use log::error;

/// Opens the detail view for `id` and starts editing its contact record.
/// Any previously open editor is discarded.
pub fn open<S: ListingSource>(source: &S, session: &mut BrowserSession, id: i64) -> CmdResult {
    let result = details::run(source, id);
    session.contact = result.details.as_ref().map(ContactEditor::for_details);
    result
}

pub fn edit(session: &mut BrowserSession, update: &ContactUpdate) -> Result<CmdResult> {
    let editor = editor_mut(session)?;
    editor.edit(update);
    Ok(CmdResult {
        contact: Some(editor.draft().clone()),
        ..CmdResult::default()
    })
}

/// Sends the changed fields. Nothing is sent when the draft matches the saved
/// record. On failure the draft is kept so the user can retry.
pub fn save<S: ListingSource>(source: &mut S, session: &mut BrowserSession) -> Result<CmdResult> {
    let editor = editor_mut(session)?;
    let update = match editor.pending_update() {
        Some(update) => update,
        None => {
            return Ok(CmdResult {
                contact: Some(editor.saved().clone()),
                ..CmdResult::default()
            }
            .with_message(CmdMessage::info("No contact changes to save")))
        }
    };

    let id = editor.listing_id();
    match source.upsert_contact(id, &update) {
        Ok(stored) => {
            editor.mark_saved(stored.clone());
            Ok(CmdResult {
                contact: Some(stored),
                ..CmdResult::default()
            }
            .with_message(CmdMessage::success(format!(
                "Contact info saved for listing {}",
                id
            ))))
        }
        Err(e) => {
            error!("contact upsert for listing {} failed: {}", id, e);
            Ok(CmdResult {
                contact: Some(editor.draft().clone()),
                ..CmdResult::default()
            }
            .with_message(CmdMessage::error(format!("Could not save contact info: {}", e))))
        }
    }
}

pub fn close(session: &mut BrowserSession) {
    session.contact = None;
}

fn editor_mut(session: &mut BrowserSession) -> Result<&mut ContactEditor> {
    session
        .contact
        .as_mut()
        .ok_or_else(|| ListingsError::Api("No listing is open for contact editing".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListingsConfig;
    use crate::source::memory::fixtures::SourceFixture;
    use crate::url::PageLocation;

    fn session() -> BrowserSession {
        BrowserSession::new(PageLocation::parse("/en/listings"), &ListingsConfig::default())
    }

    #[test]
    fn save_without_changes_makes_no_call() {
        let mut source = SourceFixture::new().with_sample().recording();
        let mut session = session();
        open(&source, &mut session, 1001);
        source.reset();

        let result = save(&mut source, &mut session).unwrap();
        assert_eq!(source.upserts(), 0);
        assert_eq!(result.messages[0].content, "No contact changes to save");
    }

    #[test]
    fn save_sends_changes_and_marks_clean() {
        let mut source = SourceFixture::new().with_sample().recording();
        let mut session = session();
        open(&source, &mut session, 1002);

        edit(
            &mut session,
            &ContactUpdate {
                author_name: Some("Bekzod".into()),
                ..Default::default()
            },
        )
        .unwrap();
        let result = save(&mut source, &mut session).unwrap();

        assert_eq!(source.upserts(), 1);
        assert_eq!(result.contact.unwrap().author_name.as_deref(), Some("Bekzod"));
        assert!(!session.contact_editor().unwrap().is_dirty());
    }

    #[test]
    fn failed_save_keeps_draft_dirty() {
        let fixture = SourceFixture::new().with_sample();
        let mut session = session();
        open(&fixture.source, &mut session, 1001);
        let mut source = fixture.source;
        source.backend().set_simulate_write_error(true);

        edit(
            &mut session,
            &ContactUpdate {
                notes: Some("Call first".into()),
                ..Default::default()
            },
        )
        .unwrap();
        let result = save(&mut source, &mut session).unwrap();

        assert!(result.has_errors());
        assert!(session.contact_editor().unwrap().is_dirty());
    }

    #[test]
    fn editing_without_open_listing_fails() {
        let mut session = session();
        assert!(edit(&mut session, &ContactUpdate::default()).is_err());
    }

    #[test]
    fn opening_missing_listing_leaves_no_editor() {
        let source = SourceFixture::new().with_sample();
        let mut session = session();
        open(&source.source, &mut session, 9999);
        assert!(session.contact_editor().is_none());
    }
}
