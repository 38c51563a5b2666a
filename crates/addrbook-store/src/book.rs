//! Append-only address book.

use addrbook_core::Address;
use tracing::info;

use crate::StoreError;

/// The one capability the enrichment workflow needs from a store.
pub trait AddressSink {
    /// Append a fully enriched address.
    fn add_address(&mut self, address: Address) -> Result<(), StoreError>;
}

/// Ordered collection of enriched addresses, append-only for its lifetime.
///
/// Records are only handed out by shared reference, so a stored address is
/// never modified. No deduplication is done: the same address saved twice
/// appears twice.
#[derive(Debug, Default)]
pub struct AddressBook {
    entries: Vec<Address>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Address] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently saved entry with the given id.
    pub fn get(&self, id: &str) -> Option<&Address> {
        self.entries.iter().rev().find(|a| a.id == id)
    }

    /// Pretty-printed JSON array of all entries.
    pub fn to_json_pretty(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

impl AddressSink for AddressBook {
    fn add_address(&mut self, address: Address) -> Result<(), StoreError> {
        if !address.is_enriched() {
            return Err(StoreError::NotEnriched(address.id));
        }
        info!(id = %address.id, total = self.entries.len() + 1, "address saved to book");
        self.entries.push(address);
        Ok(())
    }
}
