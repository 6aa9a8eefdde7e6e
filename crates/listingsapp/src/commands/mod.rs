//! # Command Layer
//!
//! The behavior of the filter panel lives here. Each command is a plain
//! function over a [`ListingSource`](crate::source::ListingSource) and the
//! [`BrowserSession`](crate::session::BrowserSession) it acts on.
//!
//! ## Role and Responsibilities
//!
//! - Mutate session state through its owners (the filter store, widgets,
//!   refresher), never by reaching around them
//! - Decide when a change is committed and follow it with the URL rewrite,
//!   the listings refetch and the availability refresh
//! - Return structured [`CmdResult`] values
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal I/O**: no stdout, stderr or formatting
//! - **Argument parsing**: that is the client's job
//! - **Propagate source failures**: a failed query is logged, turned into a
//!   neutral result and reported as a warning message
//!
//! ## Command Modules
//!
//! - [`mount`]: open a session from a URL
//! - [`filters`]: pending edits, widget actions, apply, clear
//! - [`search`]: listing queries and pagination
//! - [`refresh`]: availability refresh round trips
//! - [`details`]: listing detail view
//! - [`contact`]: contact-info editing and save
//! - [`init`]: seed a dataset
//! - [`status`]: panel snapshot for rendering

use crate::availability::RefreshOutcome;
use crate::model::{ContactInfo, ListingDetails, ListingPage};
use crate::session::PanelStatus;
use crate::widgets::Interaction;
use serde::Serialize;

pub mod contact;
pub mod details;
pub mod filters;
pub mod init;
pub mod mount;
pub mod refresh;
pub mod search;
pub mod status;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listings: Option<ListingPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ListingDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshOutcome>,
    /// Set when the command replaced the page location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelStatus>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listings(mut self, page: ListingPage) -> Self {
        self.listings = Some(page);
        self
    }

    /// Folds `other` into `self`; `other`'s values win where both are set.
    pub fn merge(mut self, other: CmdResult) -> Self {
        self.listings = other.listings.or(self.listings);
        self.details = other.details.or(self.details);
        self.contact = other.contact.or(self.contact);
        self.refresh = other.refresh.or(self.refresh);
        self.location = other.location.or(self.location);
        self.interaction = other.interaction.or(self.interaction);
        self.panel = other.panel.or(self.panel);
        self.messages.extend(other.messages);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Error))
    }
}
