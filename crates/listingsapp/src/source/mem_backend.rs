use super::backend::SourceBackend;
use crate::error::{ListingsError, Result};
use crate::model::{AttributeDescriptor, ContactInfo, Listing};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory dataset backend for tests.
///
/// `RefCell` gives the `&self` trait methods interior mutability; everything
/// here is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    attributes: RefCell<Vec<AttributeDescriptor>>,
    listings: RefCell<Vec<Listing>>,
    contacts: RefCell<BTreeMap<i64, ContactInfo>>,
    simulate_read_error: RefCell<bool>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every load fail, as an unreachable remote would.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }

    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    fn check_read(&self) -> Result<()> {
        if *self.simulate_read_error.borrow() {
            return Err(ListingsError::Source("Simulated read error".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ListingsError::Source("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl SourceBackend for MemBackend {
    fn load_attributes(&self) -> Result<Vec<AttributeDescriptor>> {
        self.check_read()?;
        Ok(self.attributes.borrow().clone())
    }

    fn save_attributes(&self, attributes: &[AttributeDescriptor]) -> Result<()> {
        self.check_write()?;
        *self.attributes.borrow_mut() = attributes.to_vec();
        Ok(())
    }

    fn load_listings(&self) -> Result<Vec<Listing>> {
        self.check_read()?;
        Ok(self.listings.borrow().clone())
    }

    fn save_listings(&self, listings: &[Listing]) -> Result<()> {
        self.check_write()?;
        *self.listings.borrow_mut() = listings.to_vec();
        Ok(())
    }

    fn load_contacts(&self) -> Result<BTreeMap<i64, ContactInfo>> {
        self.check_read()?;
        Ok(self.contacts.borrow().clone())
    }

    fn save_contacts(&self, contacts: &BTreeMap<i64, ContactInfo>) -> Result<()> {
        self.check_write()?;
        *self.contacts.borrow_mut() = contacts.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://dataset".to_string()
    }
}
