//! The success/failure envelope around every Bot API response.
//!
//! ```json
//! {"ok": true, "result": ...}
//! {"ok": false, "error_code": 429, "description": "...", "parameters": {"retry_after": 5}}
//! ```
//!
//! `ok` is read first. `result` is only interpreted on success; on failure
//! its shape is undefined and it is never looked at.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{self, json_kind};
use crate::error::{CodecError, ProtocolError};

/// Structured hints attached to some failures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// The group moved to this supergroup id; repeat the call there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before repeating the call (flood control).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Decoded envelope: the call's outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure(ProtocolError),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Convert to a `Result`, for callers that treat API failures as errors.
    pub fn into_result(self) -> Result<T, ProtocolError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(err) => Err(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            Self::Success(value) => ApiResponse::Success(f(value)),
            Self::Failure(err) => ApiResponse::Failure(err),
        }
    }
}

/// Decode an envelope from raw response bytes.
pub fn decode_envelope_slice<T: DeserializeOwned>(
    bytes: &[u8],
) -> Result<ApiResponse<T>, CodecError> {
    let value: Value = codec::decode_slice(bytes)?;
    decode_envelope(value)
}

/// Decode an envelope from a JSON tree.
pub fn decode_envelope<T: DeserializeOwned>(value: Value) -> Result<ApiResponse<T>, CodecError> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(CodecError::malformed(format!(
                "response must be a JSON object, got {}",
                json_kind(&other)
            )));
        }
    };

    let ok = match object.get("ok") {
        None => return Err(CodecError::missing_field("ok")),
        Some(Value::Bool(ok)) => *ok,
        Some(other) => {
            return Err(CodecError::type_mismatch(format!(
                "`ok` must be a boolean, got {}",
                json_kind(other)
            )));
        }
    };

    if ok {
        let result = object
            .remove("result")
            .ok_or_else(|| CodecError::missing_field("result"))?;
        return codec::decode(result).map(ApiResponse::Success);
    }

    decode_failure(object).map(ApiResponse::Failure)
}

fn decode_failure(mut object: Map<String, Value>) -> Result<ProtocolError, CodecError> {
    let code = match object.remove("error_code") {
        None => return Err(CodecError::missing_field("error_code")),
        Some(raw) => codec::decode::<i64>(raw)?,
    };
    let description = match object.remove("description") {
        None => return Err(CodecError::missing_field("description")),
        Some(raw) => codec::decode::<String>(raw)?,
    };
    let parameters = match object.remove("parameters") {
        None | Some(Value::Null) => None,
        Some(raw) => Some(codec::decode::<ResponseParameters>(raw)?),
    };

    Ok(ProtocolError {
        code,
        description,
        parameters,
    })
}

/// Encode an envelope, the inverse of [`decode_envelope`].
pub fn encode_envelope<T: Serialize>(
    response: &ApiResponse<T>,
) -> Result<Map<String, Value>, CodecError> {
    let mut object = Map::new();
    match response {
        ApiResponse::Success(result) => {
            object.insert("ok".to_string(), Value::Bool(true));
            object.insert("result".to_string(), codec::encode_value(result)?);
        }
        ApiResponse::Failure(err) => {
            object.insert("ok".to_string(), Value::Bool(false));
            object.insert("error_code".to_string(), Value::from(err.code));
            object.insert(
                "description".to_string(),
                Value::String(err.description.clone()),
            );
            if let Some(parameters) = &err.parameters {
                object.insert("parameters".to_string(), codec::encode_value(parameters)?);
            }
        }
    }
    Ok(object)
}
