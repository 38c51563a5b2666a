//! Session state and the workflows that drive it: address lookup, selection
//! and enrichment, and clear-all.

mod error;
mod session;

#[cfg(test)]
mod testing;

pub use error::SessionError;
pub use session::{LookupRequest, Session};
