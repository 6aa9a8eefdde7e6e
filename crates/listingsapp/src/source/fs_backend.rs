use super::backend::SourceBackend;
use crate::error::{ListingsError, Result};
use crate::model::{AttributeDescriptor, ContactInfo, Listing};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const ATTRIBUTES_FILE: &str = "attributes.json";
pub const LISTINGS_FILE: &str = "listings.json";
pub const CONTACTS_FILE: &str = "contacts.json";

/// JSON files in one data directory.
///
/// Missing files read as empty collections. Writes go to a temp file in the
/// same directory and are renamed over the target.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True once `listings init` (or anything else) has written listings here.
    pub fn is_initialized(&self) -> bool {
        self.root.join(LISTINGS_FILE).exists()
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path).map_err(ListingsError::Io)?;
        serde_json::from_str(&content).map_err(ListingsError::Serialization)
    }

    fn save<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(ListingsError::Io)?;
        let content = serde_json::to_string_pretty(value).map_err(ListingsError::Serialization)?;

        let target = self.root.join(name);
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", name, std::process::id()));
        fs::write(&tmp, content).map_err(ListingsError::Io)?;
        fs::rename(&tmp, &target).map_err(ListingsError::Io)?;
        Ok(())
    }
}

impl SourceBackend for FsBackend {
    fn load_attributes(&self) -> Result<Vec<AttributeDescriptor>> {
        self.load(ATTRIBUTES_FILE)
    }

    fn save_attributes(&self, attributes: &[AttributeDescriptor]) -> Result<()> {
        self.save(ATTRIBUTES_FILE, attributes)
    }

    fn load_listings(&self) -> Result<Vec<Listing>> {
        self.load(LISTINGS_FILE)
    }

    fn save_listings(&self, listings: &[Listing]) -> Result<()> {
        self.save(LISTINGS_FILE, listings)
    }

    fn load_contacts(&self) -> Result<BTreeMap<i64, ContactInfo>> {
        self.load(CONTACTS_FILE)
    }

    fn save_contacts(&self, contacts: &BTreeMap<i64, ContactInfo>) -> Result<()> {
        self.save(CONTACTS_FILE, contacts)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
