//! Address records and the wire payloads of the address-lookup endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An address-like object as returned in the lookup endpoint's `details` array.
///
/// Only the fields the client interprets are typed, and only when the backend
/// sends them with the expected JSON type. Everything else, including a typed
/// field holding some other kind of value (a numeric `postcode`, a string
/// `lat`), is kept verbatim in `extra` and carried into the [`Address`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct RawAddress {
    /// Backend identifier: any JSON value, or absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for RawAddress {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            id: fields.remove("id").filter(|v| !v.is_null()),
            street: take_string(&mut fields, "street"),
            city: take_string(&mut fields, "city"),
            postcode: take_string(&mut fields, "postcode"),
            lat: take_number(&mut fields, "lat"),
            long: take_number(&mut fields, "long"),
            extra: fields,
        }
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !fields.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match fields.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn take_number(fields: &mut Map<String, Value>, key: &str) -> Option<f64> {
    let v = fields.get(key)?.as_f64()?;
    fields.remove(key);
    Some(v)
}

/// Canonical address record: a normalised lookup result, optionally enriched
/// with the name of the person living there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Unique within one lookup result set.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    pub house_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Address {
    /// Copy of this address carrying the given first and last name.
    pub fn with_person(&self, first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            ..self.clone()
        }
    }

    /// True when both name fields are present and non-empty.
    pub fn is_enriched(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.first_name) && filled(&self.last_name)
    }

    /// One-line rendering: "Main 350, 1345 Amsterdam".
    pub fn summary(&self) -> String {
        let street = match &self.street {
            Some(s) => format!("{s} {}", self.house_number),
            None => self.house_number.clone(),
        };
        let locality: Vec<&str> = [self.postcode.as_deref(), self.city.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if locality.is_empty() {
            street
        } else {
            format!("{street}, {}", locality.join(" "))
        }
    }

    /// "Jane Doe", or `None` for an address that has not been enriched.
    pub fn person(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => None,
        }
    }
}

/// Success body of `GET /api/getAddresses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupPayload {
    pub details: Vec<RawAddress>,
}

/// Error body of `GET /api/getAddresses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub errormessage: Option<String>,
}
