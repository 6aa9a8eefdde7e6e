//! # listingsapp
//!
//! The brain of a real-estate listings filter panel: which filters are
//! applied, which are still being edited, how they map to the page URL, and
//! which attribute values remain reachable.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  UI client (crates/listings CLI, or any other front end)      │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  API (api.rs): ListingsApi<S: ListingSource>                  │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) acting on a BrowserSession:         │
//! │  filters/ · url · widgets/ · availability · contact           │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Sources (source/): ListingSource trait, DatasetSource over   │
//! │  JSON files or memory                                         │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Control Flow
//!
//! 1. The URL's `filter_*` parameters are decoded into the applied set; pending
//!    starts equal to it.
//! 2. Mount runs an unscoped availability refresh and loads page 1.
//! 3. Widgets edit pending only.
//! 4. Apply copies pending into applied, rewrites the URL, refetches page 1
//!    and refreshes availability scoped to the new applied set.
//!
//! Every no-op (applying unchanged filters, clearing nothing, removing an
//! absent filter) is detected by content equality and triggers none of that.

pub mod api;
pub mod availability;
pub mod commands;
pub mod config;
pub mod contact;
pub mod error;
pub mod filters;
pub mod model;
pub mod session;
pub mod source;
pub mod url;
pub mod widgets;

pub use error::{ListingsError, Result};
