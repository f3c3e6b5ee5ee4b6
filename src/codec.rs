//! Generic encode/decode between typed values and JSON trees.
//!
//! Plain objects use serde derive with the field contract spelled out on the
//! struct: required fields are bare types and always serialize, optional
//! fields are `Option<T>` with `#[serde(default, skip_serializing_if =
//! "Option::is_none")]`. Polymorphic fields go through their hierarchy's
//! registry (see [`crate::registry`]). This module adds the entry points and
//! maps serde failures onto [`CodecError`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::CodecError;

/// Encode a value as an ordered JSON object.
///
/// Fields keep declaration order; unset optional fields are omitted.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Map<String, Value>, CodecError> {
    match encode_value(value)? {
        Value::Object(object) => Ok(object),
        other => Err(CodecError::type_mismatch(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Encode a value as any JSON value.
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, CodecError> {
    serde_json::to_value(value).map_err(CodecError::from_serde)
}

/// Encode a value straight to JSON bytes.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(CodecError::from_serde)
}

/// Decode a typed value from a JSON tree.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, CodecError> {
    serde_json::from_value(value).map_err(CodecError::from_serde)
}

/// Decode a typed value from raw JSON bytes.
pub fn decode_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::from_serde)
}

/// Short name of a JSON value's shape, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        count: i32,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        boosts: Option<i64>,
        #[serde(with = "chrono::serde::ts_seconds")]
        date: DateTime<Utc>,
    }

    fn sample(boosts: Option<i64>) -> Sample {
        Sample {
            count: 0,
            label: String::new(),
            boosts,
            date: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_required_fields_serialize_at_default() {
        let encoded = encode(&sample(None)).unwrap();
        assert_eq!(encoded["count"], json!(0));
        assert_eq!(encoded["label"], json!(""));
        assert!(!encoded.contains_key("boosts"));
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let encoded = encode(&sample(Some(1))).unwrap();
        let keys: Vec<&str> = encoded.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["count", "label", "boosts", "date"]);
    }

    #[test]
    fn test_optional_unset_differs_from_default() {
        let unset = sample(None);
        let zero = sample(Some(0));

        let unset_back: Sample = decode(Value::Object(encode(&unset).unwrap())).unwrap();
        let zero_back: Sample = decode(Value::Object(encode(&zero).unwrap())).unwrap();

        assert_eq!(unset_back.boosts, None);
        assert_eq!(zero_back.boosts, Some(0));
        assert_ne!(unset_back, zero_back);
    }

    #[test]
    fn test_date_time_from_unix_seconds() {
        let decoded: Sample =
            decode(json!({"count": 1, "label": "x", "date": 1_700_000_000})).unwrap();
        assert_eq!(decoded.date.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_numeric_widening() {
        #[derive(Debug, Deserialize)]
        struct Wide {
            value: i64,
        }
        let decoded: Wide = decode(json!({"value": 7u8})).unwrap();
        assert_eq!(decoded.value, 7);
    }

    #[test]
    fn test_missing_required_field() {
        let err = decode::<Sample>(json!({"count": 1, "date": 0})).unwrap_err();
        assert_eq!(err, CodecError::missing_field("label"));
    }

    #[test]
    fn test_type_mismatch() {
        let err = decode::<Sample>(json!({"count": "one", "label": "x", "date": 0})).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let decoded: Sample = decode(json!({
            "count": 2,
            "label": "y",
            "date": 0,
            "added_in_a_later_version": {"nested": true}
        }))
        .unwrap();
        assert_eq!(decoded.count, 2);
    }

    #[test]
    fn test_decode_slice_malformed() {
        let err = decode_slice::<Sample>(b"{\"count\": ").unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload { .. }));
    }

    #[test]
    fn test_encode_non_object_is_type_mismatch() {
        let err = encode(&42).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }
}
