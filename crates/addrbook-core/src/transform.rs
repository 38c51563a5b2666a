//! Normalisation of raw lookup results into canonical [`Address`] records.
//!
//! The backend does not always send an identifier, so one is derived from the
//! coordinates as `"<lat>-<long>"`. Numbers are rendered in JavaScript's
//! `Number#toString` form: `1` rather than `1.0`, `52.37` rather than
//! `52.370000`, and exponent notation outside `[1e-6, 1e21)` (`1e+21`, `1e-7`).

use serde_json::Value;

use crate::address::{Address, RawAddress};

/// Fields the canonical record owns; copies of them in `extra` are dropped.
const OWNED_FIELDS: &[&str] = &["id", "houseNumber", "firstName", "lastName"];

/// Build the canonical record for `raw`, found by searching for `house_number`.
///
/// Keeps every field of the payload, sets the house number, and uses the
/// payload's id unless it is empty, `0` or `false`. Otherwise the id is
/// `"<lat>-<long>"`, rendered from whatever the coordinates hold, with
/// `undefined` standing in for a missing one.
pub fn transform_address(raw: &RawAddress, house_number: &str) -> Address {
    let id = raw
        .id
        .as_ref()
        .and_then(explicit_id)
        .unwrap_or_else(|| coordinate_id(raw));

    let mut extra = raw.extra.clone();
    for field in OWNED_FIELDS {
        extra.remove(*field);
    }

    Address {
        id,
        street: raw.street.clone(),
        city: raw.city.clone(),
        postcode: raw.postcode.clone(),
        house_number: house_number.to_string(),
        lat: raw.lat,
        long: raw.long,
        first_name: None,
        last_name: None,
        extra,
    }
}

fn explicit_id(id: &Value) -> Option<String> {
    match id {
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Bool(false) | Value::Null => None,
        other => Some(render_value(other)),
    }
}

fn coordinate_id(raw: &RawAddress) -> String {
    let part = |typed: Option<f64>, key: &str| match (typed, raw.extra.get(key)) {
        (Some(v), _) => format_number(v),
        (None, Some(value)) => render_value(value),
        (None, None) => "undefined".to_string(),
    };
    format!("{}-{}", part(raw.lat, "lat"), part(raw.long, "long"))
}

/// Strings verbatim, numbers via [`format_number`], containers as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

fn format_number(v: f64) -> String {
    let abs = v.abs();
    if v == 0.0 {
        // Also folds -0.0.
        "0".to_string()
    } else if !v.is_finite() {
        format!("{v}")
    } else if !(1e-6..1e21).contains(&abs) {
        let s = format!("{v:e}");
        match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        }
    } else if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawAddress {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn derives_id_from_integral_coordinates() {
        let addr = transform_address(&raw(json!({"lat": 1, "long": 2, "street": "Main"})), "350");
        assert_eq!(addr.id, "1-2");
        assert_eq!(addr.house_number, "350");
        assert_eq!(addr.street.as_deref(), Some("Main"));
    }

    #[test]
    fn derives_id_from_fractional_coordinates() {
        let addr = transform_address(&raw(json!({"lat": 52.37, "long": 4.895})), "1");
        assert_eq!(addr.id, "52.37-4.895");
    }

    #[test]
    fn negative_coordinates_keep_their_sign() {
        let addr = transform_address(&raw(json!({"lat": -33.86, "long": 151.2})), "1");
        assert_eq!(addr.id, "-33.86-151.2");
        let zero = transform_address(&raw(json!({"lat": -0.0, "long": 0})), "1");
        assert_eq!(zero.id, "0-0");
    }

    #[test]
    fn missing_coordinates_render_undefined() {
        let addr = transform_address(&raw(json!({"street": "Nowhere"})), "9");
        assert_eq!(addr.id, "undefined-undefined");
    }

    #[test]
    fn explicit_string_id_preserved() {
        let addr = transform_address(&raw(json!({"id": "abc", "lat": 1, "long": 2})), "350");
        assert_eq!(addr.id, "abc");
    }

    #[test]
    fn explicit_numeric_id_preserved() {
        let addr = transform_address(&raw(json!({"id": 17, "lat": 1, "long": 2})), "350");
        assert_eq!(addr.id, "17");
    }

    #[test]
    fn string_coordinates_are_used_verbatim() {
        let addr = transform_address(&raw(json!({"lat": "52.1", "long": "4.9", "street": "Dam"})), "1");
        assert_eq!(addr.id, "52.1-4.9");
        assert!(addr.lat.is_none());
        assert_eq!(addr.extra["lat"], "52.1");
        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(json["long"], "4.9");
    }

    #[test]
    fn mixed_and_null_coordinates() {
        let addr = transform_address(&raw(json!({"lat": 1, "long": "2"})), "1");
        assert_eq!(addr.id, "1-2");
        let addr = transform_address(&raw(json!({"lat": null, "long": 2})), "1");
        assert_eq!(addr.id, "null-2");
    }

    #[test]
    fn numeric_postcode_is_carried_over() {
        let addr = transform_address(&raw(json!({"lat": 1, "long": 2, "postcode": 1345})), "350");
        assert_eq!(addr.id, "1-2");
        assert!(addr.postcode.is_none());
        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(json["postcode"], 1345);
        assert_eq!(json["houseNumber"], "350");
    }

    #[test]
    fn truthy_non_scalar_ids_are_kept() {
        let addr = transform_address(&raw(json!({"id": true, "lat": 1, "long": 2})), "1");
        assert_eq!(addr.id, "true");
        let addr = transform_address(&raw(json!({"id": {"osm": 7}, "lat": 1, "long": 2})), "1");
        assert_eq!(addr.id, r#"{"osm":7}"#);
        let addr = transform_address(&raw(json!({"id": [7], "lat": 1, "long": 2})), "1");
        assert_eq!(addr.id, "[7]");
    }

    #[test]
    fn extreme_numbers_use_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-7), "-2.5e-7");
        assert_eq!(format_number(1e-6), "0.000001");
        assert_eq!(format_number(123456789012.0), "123456789012");
        let addr = transform_address(&raw(json!({"lat": 1e21, "long": 1e-7})), "1");
        assert_eq!(addr.id, "1e+21-1e-7");
    }

    #[test]
    fn falsy_ids_fall_back_to_coordinates() {
        for id in [json!(""), json!(0), json!(false)] {
            let addr = transform_address(&raw(json!({"id": id, "lat": 3, "long": 4})), "1");
            assert_eq!(addr.id, "3-4");
        }
    }

    #[test]
    fn house_number_overrides_payload() {
        let addr = transform_address(
            &raw(json!({"lat": 1, "long": 2, "houseNumber": "12", "country": "NL"})),
            "350",
        );
        assert_eq!(addr.house_number, "350");
        assert!(!addr.extra.contains_key("houseNumber"));
        assert_eq!(addr.extra["country"], "NL");
        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(json["houseNumber"], "350");
    }

    #[test]
    fn transform_is_deterministic() {
        let input = raw(json!({"lat": 51.5, "long": -0.12, "city": "London"}));
        assert_eq!(transform_address(&input, "10"), transform_address(&input, "10"));
    }

    #[test]
    fn transformed_address_is_not_enriched() {
        let addr = transform_address(&raw(json!({"lat": 1, "long": 2, "firstName": "X"})), "1");
        assert!(addr.first_name.is_none());
        assert!(!addr.extra.contains_key("firstName"));
    }
}
