use super::{refresh, search, CmdMessage, CmdResult};
use crate::error::{ListingsError, Result};
use crate::filters::{FilterCommit, FilterSet};
use crate::model::FilterValue;
use crate::session::BrowserSession;
use crate::source::ListingSource;
use crate::widgets::{Interaction, Widget, WidgetAction};
use log::debug;

/// Sets a pending filter directly, bypassing widgets.
pub fn set_filter(session: &mut BrowserSession, fv: FilterValue) -> CmdResult {
    let code = fv.attribute_code.clone();
    let changed = session.store.set_filter(fv);
    pending_changed(session, &code, changed)
}

pub fn remove_filter(session: &mut BrowserSession, code: &str) -> CmdResult {
    let changed = session.store.remove_filter(code);
    pending_changed(session, code, changed)
}

fn pending_changed(session: &mut BrowserSession, code: &str, changed: bool) -> CmdResult {
    let mut result = CmdResult::default();
    if changed {
        session.sync_widgets();
        session.hint = Some(code.to_string());
        result.interaction = Some(Interaction::new(code));
    }
    result
}

/// Routes a user action to the widget for `code`.
pub fn interact(session: &mut BrowserSession, code: &str, action: WidgetAction) -> Result<CmdResult> {
    let attr = session
        .catalog
        .get(code)
        .ok_or_else(|| ListingsError::UnknownAttribute(code.to_string()))?;

    if !session.widgets.contains_key(code) {
        let widget = Widget::for_attribute(attr, session.store.pending())
            .ok_or_else(|| ListingsError::Api(format!("Attribute {} has no filter widget", code)))?;
        session.widgets.insert(code.to_string(), widget);
    }
    let widget = session
        .widgets
        .get_mut(code)
        .ok_or_else(|| ListingsError::UnknownAttribute(code.to_string()))?;

    let hit = widget.handle(action, attr, &mut session.store)?;
    let mut result = CmdResult::default();
    if let Some(interaction) = hit {
        debug!("interaction on {}", interaction.code);
        session.hint = Some(interaction.code.clone());
        result.interaction = Some(interaction);
    }
    Ok(result)
}

pub fn apply<S: ListingSource>(source: &S, session: &mut BrowserSession) -> CmdResult {
    match session.store.apply_filters() {
        FilterCommit::Unchanged => {
            CmdResult::default().with_message(CmdMessage::info("No filter changes to apply"))
        }
        FilterCommit::Committed(applied) => committed(source, session, applied),
    }
}

pub fn clear<S: ListingSource>(source: &S, session: &mut BrowserSession) -> CmdResult {
    let commit = session.store.clear_filters();
    session.sync_widgets();
    match commit {
        FilterCommit::Unchanged => CmdResult::default(),
        FilterCommit::Committed(applied) => committed(source, session, applied)
            .with_message(CmdMessage::success("Filters cleared")),
    }
}

/// Removes one applied filter and applies immediately, as removing a chip does.
pub fn remove_applied<S: ListingSource>(source: &S, session: &mut BrowserSession, code: &str) -> CmdResult {
    if !session.store.applied().contains(code) {
        return CmdResult::default()
            .with_message(CmdMessage::info(format!("No applied filter for {}", code)));
    }
    session.store.remove_filter(code);
    session.sync_widgets();
    apply(source, session)
}

/// URL rewrite, refetch of page 1 and an availability refresh, in that order.
fn committed<S: ListingSource>(source: &S, session: &mut BrowserSession, applied: FilterSet) -> CmdResult {
    session.navigate(&applied);
    let mut result = CmdResult {
        location: Some(session.location.to_string()),
        ..CmdResult::default()
    };
    result = result.merge(search::fetch(source, session, 1));
    result.merge(refresh::run(source, session, &applied))
}
