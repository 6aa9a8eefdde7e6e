use crate::error::Result;
use crate::model::{AttributeDescriptor, ContactInfo, Listing};
use std::collections::BTreeMap;

/// Raw dataset I/O.
///
/// The backend handles "where the records live" (memory, JSON files), while
/// [`super::DatasetSource`] handles "what a query means" (matching, paging,
/// facets). Every method takes `&self`; backends use interior mutability
/// where they need it.
pub trait SourceBackend {
    /// Attribute definitions in display order. Empty when none were stored.
    fn load_attributes(&self) -> Result<Vec<AttributeDescriptor>>;

    fn save_attributes(&self, attributes: &[AttributeDescriptor]) -> Result<()>;

    fn load_listings(&self) -> Result<Vec<Listing>>;

    fn save_listings(&self, listings: &[Listing]) -> Result<()>;

    fn load_contacts(&self) -> Result<BTreeMap<i64, ContactInfo>>;

    /// MUST be atomic, so a failed write leaves the previous contacts readable.
    fn save_contacts(&self, contacts: &BTreeMap<i64, ContactInfo>) -> Result<()>;

    /// Human-readable location, for `listings config` and error messages.
    fn describe(&self) -> String;
}
