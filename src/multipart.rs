//! Final outgoing payload of a Bot API call.
//!
//! A request without local uploads is sent as a plain JSON object. A request
//! with at least one upload becomes a multipart body: the JSON-encoded fields
//! (uploads replaced by `attach://<name>` placeholders) plus one part per
//! attachment, matched to its placeholder by part name.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::codec;
use crate::error::CodecError;
use crate::input_file::{ATTACH_PREFIX, FileResolver};
use crate::methods::Method;

/// Raw bytes of one uploaded file, keyed by its attachment name.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

/// JSON fields plus the attachment parts they reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartBody {
    body: Map<String, Value>,
    attachments: Vec<Attachment>,
}

impl MultipartBody {
    pub fn new(body: Map<String, Value>) -> Self {
        Self {
            body,
            attachments: Vec::new(),
        }
    }

    /// Add an attachment part. Part names must be unique within the body.
    pub fn attach(&mut self, attachment: Attachment) -> Result<(), CodecError> {
        if self.attachments.iter().any(|a| a.name == attachment.name) {
            return Err(CodecError::DuplicateAttachmentName {
                name: attachment.name,
            });
        }
        self.attachments.push(attachment);
        Ok(())
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Attachment names referenced by `attach://` placeholders in the body,
    /// in document order.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names = Vec::new();
        for value in self.body.values() {
            collect_placeholders(value, &mut names);
        }
        names
    }

    /// Render as a multipart form.
    ///
    /// Each top-level field becomes a text part (strings verbatim, anything
    /// else JSON-encoded), followed by one file part per attachment.
    pub fn into_form(self) -> Result<Form, CodecError> {
        let mut form = Form::new();
        for (key, value) in self.body {
            let text = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            form = form.text(key, text);
        }
        for attachment in self.attachments {
            let part = Part::bytes(attachment.data.to_vec())
                .file_name(attachment.file_name)
                .mime_str(&attachment.mime_type)
                .map_err(|err| CodecError::AttachmentUnavailable {
                    name: attachment.name.clone(),
                    reason: format!("invalid MIME type `{}`: {err}", attachment.mime_type),
                })?;
            form = form.part(attachment.name, part);
        }
        Ok(form)
    }
}

fn collect_placeholders(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            if let Some(name) = text.strip_prefix(ATTACH_PREFIX) {
                names.push(name.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_placeholders(item, names);
            }
        }
        Value::Object(fields) => {
            for field in fields.values() {
                collect_placeholders(field, names);
            }
        }
        _ => {}
    }
}

/// Wire payload of one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Map<String, Value>),
    Multipart(MultipartBody),
}

impl Payload {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// JSON fields of the call, placeholders included.
    pub fn body(&self) -> &Map<String, Value> {
        match self {
            Self::Json(body) => body,
            Self::Multipart(multipart) => multipart.body(),
        }
    }

    pub fn attachments(&self) -> &[Attachment] {
        match self {
            Self::Json(_) => &[],
            Self::Multipart(multipart) => multipart.attachments(),
        }
    }
}

/// Encode a request into its wire payload.
///
/// Uploads are read here, which may block on file or reader I/O; see
/// [`build_payload_async`] for use on an async runtime.
#[instrument(skip(method), fields(method = M::NAME))]
pub fn build_payload<M: Method>(mut method: M) -> Result<Payload, CodecError> {
    let mut resolver = FileResolver::new();
    resolver.resolve(method.input_files())?;
    resolver.check_references(method.input_files())?;
    let body = codec::encode(&method)?;

    if resolver.is_empty() {
        debug!(fields = body.len(), "Plain JSON payload");
        return Ok(Payload::Json(body));
    }

    let mut multipart = MultipartBody::new(body);
    for attachment in resolver.into_attachments() {
        multipart.attach(attachment)?;
    }
    debug!(
        fields = multipart.body().len(),
        attachments = multipart.attachments().len(),
        "Multipart payload"
    );
    Ok(Payload::Multipart(multipart))
}

/// [`build_payload`] on the blocking thread pool.
pub async fn build_payload_async<M>(method: M) -> Result<Payload, CodecError>
where
    M: Method + Send + 'static,
{
    tokio::task::spawn_blocking(move || build_payload(method))
        .await
        .map_err(|err| CodecError::AttachmentUnavailable {
            name: M::NAME.to_string(),
            reason: format!("upload task failed: {err}"),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attachment(name: &str) -> Attachment {
        Attachment {
            name: name.to_string(),
            file_name: format!("{name}.bin"),
            mime_type: "application/octet-stream".to_string(),
            data: Bytes::from_static(b"x"),
        }
    }

    #[test]
    fn test_duplicate_attachment_name_rejected() {
        let mut body = MultipartBody::new(Map::new());
        body.attach(attachment("photo_0")).unwrap();
        let err = body.attach(attachment("photo_0")).unwrap_err();
        assert_eq!(
            err,
            CodecError::DuplicateAttachmentName {
                name: "photo_0".to_string()
            }
        );
        assert_eq!(body.attachments().len(), 1);
    }

    #[test]
    fn test_placeholders_found_in_nested_values() {
        let body = json!({
            "chat_id": 1,
            "media": [
                {"type": "photo", "media": "attach://media_0_media_0"},
                {"type": "photo", "media": "file-id"}
            ],
            "photo": "attach://photo_1"
        });
        let Value::Object(body) = body else { unreachable!() };
        let multipart = MultipartBody::new(body);
        assert_eq!(
            multipart.placeholders(),
            vec!["media_0_media_0".to_string(), "photo_1".to_string()]
        );
    }

    #[test]
    fn test_into_form_rejects_bad_mime() {
        let mut body = MultipartBody::new(Map::new());
        let mut bad = attachment("doc_0");
        bad.mime_type = "not a mime".to_string();
        body.attach(bad).unwrap();
        assert!(matches!(
            body.into_form(),
            Err(CodecError::AttachmentUnavailable { .. })
        ));
    }

    #[test]
    fn test_into_form_accepts_valid_body() {
        let Value::Object(fields) = json!({"chat_id": 5, "caption": "hi"}) else {
            unreachable!()
        };
        let mut body = MultipartBody::new(fields);
        body.attach(attachment("photo_0")).unwrap();
        assert!(body.into_form().is_ok());
    }
}
