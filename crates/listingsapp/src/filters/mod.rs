//! # Filter State
//!
//! The filter panel works on two [`FilterSet`]s at once:
//!
//! - **applied**: drives the listing query and the URL.
//! - **pending**: what the widgets show and edit.
//!
//! Both start equal. Widget edits only touch `pending`; [`FilterStore::apply_filters`]
//! copies `pending` into `applied` and [`FilterStore::clear_filters`] empties both.
//!
//! ## Content Equality and No-ops
//!
//! Two sets are equal when their canonical JSON matches. Every mutation checks
//! this first and returns the *same* container when nothing would change, so
//! callers can use [`FilterSet::ptr_eq`] to skip redundant URL writes and
//! refetches.
//!
//! The store does no I/O. Apply and clear return a [`FilterCommit`]; the session
//! performs the URL rewrite, refetch and availability refresh when it is
//! `Committed`.

pub mod label;
pub mod set;
pub mod store;

pub use label::FilterChip;
pub use set::FilterSet;
pub use store::{FilterCommit, FilterStore};
