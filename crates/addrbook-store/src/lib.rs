//! Storage layer: the process-wide address book, held in memory.

mod book;
mod error;

pub use book::{AddressBook, AddressSink};
pub use error::StoreError;
