//! HTTP client for the address-lookup backend.

use addrbook_core::{ErrorPayload, LookupPayload, RawAddress};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::{AddressSource, LookupError};

/// Client for `GET /api/getAddresses`.
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
}

impl LookupClient {
    /// Create a new lookup client for the given backend base URL.
    ///
    /// `base_url` should be like `http://localhost:3000`; a trailing slash is
    /// dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/api/getAddresses", self.base_url)
    }

    /// Look up the addresses matching a postal code and house number.
    ///
    /// A non-success status with a JSON error body becomes
    /// [`LookupError::Server`], carrying its `errormessage` when non-empty.
    /// Bodies that do not decode, on either path, are [`LookupError::Json`].
    pub async fn get_addresses(
        &self,
        postcode: &str,
        house_number: &str,
    ) -> Result<Vec<RawAddress>, LookupError> {
        let url = self.endpoint();

        info!(url = %url, postcode, house_number, "looking up addresses");
        let resp = self
            .client
            .get(&url)
            .query(&[("postcode", postcode), ("streetnumber", house_number)])
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            // An error body that is not the documented payload (a proxy's HTML
            // page, say) is a transport fault, not a server answer.
            let payload: ErrorPayload = serde_json::from_slice(&body)?;
            let message = payload.errormessage.filter(|m| !m.is_empty());
            debug!(status = status.as_u16(), ?message, "lookup rejected by server");
            return Err(LookupError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let payload: LookupPayload = serde_json::from_slice(&body)?;
        info!(count = payload.details.len(), "lookup complete");
        Ok(payload.details)
    }
}

#[async_trait]
impl AddressSource for LookupClient {
    async fn fetch_addresses(
        &self,
        postcode: &str,
        house_number: &str,
    ) -> Result<Vec<RawAddress>, LookupError> {
        self.get_addresses(postcode, house_number).await
    }
}
