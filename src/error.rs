//! Error types for the wire codec.
//!
//! Structural faults (a corrupt payload, a programming error while building a
//! request) are `CodecError`s and are returned synchronously. Failures
//! reported by the Bot API itself are `ProtocolError` values carried inside
//! [`crate::response::ApiResponse::Failure`], so callers can tell the two
//! apart.

use serde_json::error::Category;
use thiserror::Error;

use crate::response::ResponseParameters;

/// Structural encode/decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A polymorphic object carried no discriminator field.
    #[error("missing discriminator `{field}` for {hierarchy}")]
    MissingDiscriminator { hierarchy: String, field: String },

    /// A required field was absent.
    #[error("missing field `{field}`")]
    MissingRequiredField { field: String },

    /// A value had the wrong JSON shape for its declared type.
    #[error("type mismatch: {detail}")]
    TypeMismatch { detail: String },

    /// The payload is not valid JSON or not a JSON object where one is needed.
    #[error("malformed payload: {detail}")]
    MalformedPayload { detail: String },

    /// The byte source of a local upload could not be read.
    #[error("attachment `{name}` unavailable: {reason}")]
    AttachmentUnavailable { name: String, reason: String },

    /// Two attachment parts of one request share a name.
    #[error("duplicate attachment name `{name}`")]
    DuplicateAttachmentName { name: String },
}

impl CodecError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    pub fn type_mismatch(detail: impl Into<String>) -> Self {
        Self::TypeMismatch {
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedPayload {
            detail: detail.into(),
        }
    }

    /// Classify a serde_json error into the codec taxonomy.
    ///
    /// Errors raised by registry-backed hierarchies nested inside derived
    /// structs reach us as serde "custom" messages; their `Display` prefixes
    /// are recognised here so the structured kind survives the trip.
    pub fn from_serde(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io | Category::Syntax | Category::Eof => Self::malformed(err.to_string()),
            Category::Data => {
                let message = err.to_string();
                let position = format!(" at line {} column {}", err.line(), err.column());
                let message = message.strip_suffix(&position).unwrap_or(&message);
                Self::from_data_message(message)
            }
        }
    }

    fn from_data_message(message: &str) -> Self {
        if let Some(rest) = message.strip_prefix("missing field `") {
            if let Some((field, _)) = rest.split_once('`') {
                return Self::missing_field(field);
            }
        }
        if let Some(rest) = message.strip_prefix("missing discriminator `") {
            if let Some((field, hierarchy)) = rest.split_once("` for ") {
                return Self::MissingDiscriminator {
                    hierarchy: hierarchy.to_string(),
                    field: field.to_string(),
                };
            }
        }
        if let Some(detail) = message.strip_prefix("malformed payload: ") {
            return Self::malformed(detail);
        }
        if let Some(detail) = message.strip_prefix("type mismatch: ") {
            return Self::type_mismatch(detail);
        }
        Self::type_mismatch(message)
    }
}

/// A failure reported by the Bot API (`"ok": false`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Bot API error {code}: {description}")]
pub struct ProtocolError {
    pub code: i64,
    pub description: String,
    pub parameters: Option<ResponseParameters>,
}

impl ProtocolError {
    /// Seconds to wait before repeating the request, when flood control hit.
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        self.parameters
            .as_ref()
            .and_then(|p| p.retry_after)
            .map(std::time::Duration::from_secs)
    }

    /// New chat id when a group was migrated to a supergroup.
    pub fn migrate_to_chat_id(&self) -> Option<i64> {
        self.parameters.as_ref().and_then(|p| p.migrate_to_chat_id)
    }
}
