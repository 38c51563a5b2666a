//! Canned address source for workflow tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use addrbook_core::RawAddress;
use addrbook_sync::{AddressSource, LookupError};
use async_trait::async_trait;
use serde_json::Value;

/// What the source answers every query with.
pub enum Reply {
    /// Success with this `details` array.
    Details(Value),
    /// Non-success status with an optional `errormessage`.
    Server(u16, Option<String>),
    /// A body that does not decode.
    Malformed,
}

pub struct StaticSource {
    reply: Reply,
    calls: AtomicUsize,
    last_query: Mutex<Option<(String, String)>>,
}

impl StaticSource {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<(String, String)> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl AddressSource for StaticSource {
    async fn fetch_addresses(
        &self,
        postcode: &str,
        house_number: &str,
    ) -> Result<Vec<RawAddress>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some((postcode.to_string(), house_number.to_string()));

        match &self.reply {
            Reply::Details(details) => Ok(serde_json::from_value(details.clone())?),
            Reply::Server(status, message) => Err(LookupError::Server {
                status: *status,
                message: message.clone(),
            }),
            Reply::Malformed => Err(serde_json::from_str::<Value>("<html>").unwrap_err().into()),
        }
    }
}
