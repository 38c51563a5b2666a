use addrbook_core::RawAddress;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    /// Non-success status. `message` is the body's `errormessage`, if any.
    #[error("server returned {status}")]
    Server { status: u16, message: Option<String> },
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LookupError {
    /// True for faults below the application protocol: unreachable host,
    /// broken connection, undecodable payload.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Server { .. })
    }
}

/// Something that can resolve a postal code and house number to addresses.
#[async_trait]
pub trait AddressSource: Send + Sync {
    async fn fetch_addresses(
        &self,
        postcode: &str,
        house_number: &str,
    ) -> Result<Vec<RawAddress>, LookupError>;
}
