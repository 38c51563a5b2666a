//! Lookup layer: the `AddressSource` seam and its HTTP implementation.

mod source;
pub use source::{AddressSource, LookupError};

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::LookupClient;
