use crate::model::{ContactInfo, ContactUpdate, ListingDetails};

/// Draft-vs-saved editing of one listing's contact record.
///
/// Mirrors the pending/applied split of the filter panel: edits touch the
/// draft, and a save is only worth sending when the draft differs from what
/// was last stored. Dropping the editor discards the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEditor {
    listing_id: i64,
    saved: ContactInfo,
    draft: ContactInfo,
}

impl ContactEditor {
    pub fn new(listing_id: i64, saved: ContactInfo) -> Self {
        Self {
            listing_id,
            draft: saved.clone(),
            saved,
        }
    }

    pub fn for_details(details: &ListingDetails) -> Self {
        Self::new(details.listing.id, details.details.clone())
    }

    pub fn listing_id(&self) -> i64 {
        self.listing_id
    }

    pub fn saved(&self) -> &ContactInfo {
        &self.saved
    }

    pub fn draft(&self) -> &ContactInfo {
        &self.draft
    }

    pub fn set_author_name(&mut self, value: Option<String>) {
        self.draft.author_name = normalize(value);
    }

    pub fn set_author_phone(&mut self, value: Option<String>) {
        self.draft.author_phone = normalize(value);
    }

    pub fn set_notes(&mut self, value: Option<String>) {
        self.draft.notes = normalize(value);
    }

    /// Applies every field present in `update` to the draft.
    pub fn edit(&mut self, update: &ContactUpdate) {
        if let Some(name) = &update.author_name {
            self.set_author_name(Some(name.clone()));
        }
        if let Some(phone) = &update.author_phone {
            self.set_author_phone(Some(phone.clone()));
        }
        if let Some(notes) = &update.notes {
            self.set_notes(Some(notes.clone()));
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved
    }

    /// The fields that differ from the saved record, or `None` when clean.
    ///
    /// A field cleared in the draft is sent as an empty string, since an
    /// absent field means "leave as stored".
    pub fn pending_update(&self) -> Option<ContactUpdate> {
        if !self.is_dirty() {
            return None;
        }
        let diff = |draft: &Option<String>, saved: &Option<String>| {
            (draft != saved).then(|| draft.clone().unwrap_or_default())
        };
        Some(ContactUpdate {
            author_name: diff(&self.draft.author_name, &self.saved.author_name),
            author_phone: diff(&self.draft.author_phone, &self.saved.author_phone),
            notes: diff(&self.draft.notes, &self.saved.notes),
        })
    }

    /// Records what the source stored. The draft follows it.
    pub fn mark_saved(&mut self, stored: ContactInfo) {
        self.draft = stored.clone();
        self.saved = stored;
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
