//! File references in outgoing requests.
//!
//! A file-valued field is an existing `file_id`, a URL Telegram fetches
//! itself, or a local upload. The first two are sent inline as plain strings.
//! Uploads are read by the [`FileResolver`], moved into a multipart part and
//! replaced in the JSON body by an `attach://<name>` placeholder.

use std::collections::HashSet;
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::CodecError;
use crate::multipart::Attachment;

/// Prefix of placeholders pointing at multipart parts.
pub const ATTACH_PREFIX: &str = "attach://";

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// A single-use reader shared between clones of the same upload.
#[derive(Clone)]
pub struct SharedReader(Arc<Mutex<Option<Box<dyn Read + Send>>>>);

impl SharedReader {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(Some(Box::new(reader)))))
    }

    /// Drain the reader. Fails once it has been drained before.
    fn take_bytes(&self) -> io::Result<Bytes> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("reader lock poisoned"))?;
        let mut reader = guard.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "stream already consumed")
        })?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    fn is_consumed(&self) -> bool {
        self.0.lock().map(|guard| guard.is_none()).unwrap_or(true)
    }
}

impl fmt::Debug for SharedReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedReader")
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

impl PartialEq for SharedReader {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Where the bytes of an upload come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ByteSource {
    Memory(Bytes),
    Path(PathBuf),
    Reader(SharedReader),
}

impl ByteSource {
    /// Read the full content. May block on file or reader I/O.
    pub fn read_all(&self) -> io::Result<Bytes> {
        match self {
            Self::Memory(bytes) => Ok(bytes.clone()),
            Self::Path(path) => std::fs::read(path).map(Bytes::from),
            Self::Reader(reader) => reader.take_bytes(),
        }
    }
}

/// A local upload: bytes plus the file name and MIME type of its part.
#[derive(Debug, Clone, PartialEq)]
pub struct FileStream {
    pub source: ByteSource,
    pub file_name: String,
    pub mime_type: String,
}

/// Value of a file-valued request field.
///
/// On the wire every inline form is a bare string, so decoding classifies by
/// prefix: `attach://` is [`InputFile::Attached`], `http://` and `https://`
/// are [`InputFile::Url`], anything else is [`InputFile::FileId`]. A `FileId`
/// built around a URL therefore decodes as `Url`; the encoded string is the
/// same.
#[derive(Debug, Clone, PartialEq)]
pub enum InputFile {
    /// A file already stored on Telegram's servers.
    FileId(String),
    /// An HTTP(S) URL Telegram downloads itself.
    Url(String),
    /// Bytes sent as a multipart part.
    Upload(FileStream),
    /// An upload already moved into the part named here. Produced by the
    /// resolver and encoded as `attach://<name>`.
    Attached(String),
}

impl InputFile {
    pub fn file_id(file_id: impl Into<String>) -> Self {
        Self::FileId(file_id.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn memory(data: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self::upload(ByteSource::Memory(data.into()), file_name.into())
    }

    /// Upload a file from disk; the part is named after the path's file name.
    pub fn path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        Self::upload(ByteSource::Path(path.to_path_buf()), file_name)
    }

    /// Upload from a reader. The reader is drained once; a second resolution
    /// of the same upload fails.
    pub fn reader(reader: impl Read + Send + 'static, file_name: impl Into<String>) -> Self {
        Self::upload(ByteSource::Reader(SharedReader::new(reader)), file_name.into())
    }

    fn upload(source: ByteSource, file_name: String) -> Self {
        Self::Upload(FileStream {
            source,
            file_name,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        })
    }

    /// Set the part's MIME type. No effect on non-upload references.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        if let Self::Upload(stream) = &mut self {
            stream.mime_type = mime_type.into();
        }
        self
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Upload(_))
    }

    /// The inline string form, if this reference has one.
    pub fn as_inline(&self) -> Option<String> {
        match self {
            Self::FileId(id) => Some(id.clone()),
            Self::Url(url) => Some(url.clone()),
            Self::Attached(name) => Some(format!("{ATTACH_PREFIX}{name}")),
            Self::Upload(_) => None,
        }
    }
}

impl Serialize for InputFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self, self.as_inline()) {
            (_, Some(inline)) => serializer.serialize_str(&inline),
            (Self::Upload(stream), None) => Err(S::Error::custom(format!(
                "type mismatch: upload `{}` must be resolved into a multipart attachment",
                stream.file_name
            ))),
            (_, None) => Err(S::Error::custom("type mismatch: file reference has no inline form")),
        }
    }
}

impl<'de> Deserialize<'de> for InputFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Err(D::Error::custom("type mismatch: empty file reference"));
        }
        if let Some(name) = raw.strip_prefix(ATTACH_PREFIX) {
            return Ok(Self::Attached(name.to_string()));
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(Self::Url(raw));
        }
        Ok(Self::FileId(raw))
    }
}

/// A file-valued field of a request, addressed by its dotted path
/// (`photo`, `media.1.thumbnail`).
pub struct FileSlot<'a> {
    pub path: String,
    pub file: &'a mut InputFile,
}

impl<'a> FileSlot<'a> {
    pub fn new(path: impl Into<String>, file: &'a mut InputFile) -> Self {
        Self {
            path: path.into(),
            file,
        }
    }

    /// Slot for an optional field; absent fields yield nothing.
    pub fn optional(path: impl Into<String>, file: Option<&'a mut InputFile>) -> Option<Self> {
        file.map(|file| Self::new(path, file))
    }
}

/// Attachment name for the `sequence`-th upload found at `path`.
///
/// Unique within a request because the sequence number is.
pub fn attachment_name(path: &str, sequence: usize) -> String {
    let mut name: String = path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    name.push('_');
    name.push_str(&sequence.to_string());
    name
}

/// Moves local uploads out of a request's file fields.
#[derive(Debug, Default)]
pub struct FileResolver {
    attachments: Vec<Attachment>,
}

impl FileResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every slot in order.
    ///
    /// Inline references are left untouched. Each upload is read, recorded as
    /// an [`Attachment`] and replaced by [`InputFile::Attached`].
    pub fn resolve<'a>(
        &mut self,
        slots: impl IntoIterator<Item = FileSlot<'a>>,
    ) -> Result<(), CodecError> {
        for slot in slots {
            self.resolve_slot(slot)?;
        }
        Ok(())
    }

    fn resolve_slot(&mut self, slot: FileSlot<'_>) -> Result<(), CodecError> {
        let InputFile::Upload(stream) = &*slot.file else {
            return Ok(());
        };

        let name = attachment_name(&slot.path, self.attachments.len());
        let data = stream.source.read_all().map_err(|err| {
            warn!(path = %slot.path, error = %err, "Upload source unreadable");
            CodecError::AttachmentUnavailable {
                name: name.clone(),
                reason: err.to_string(),
            }
        })?;
        debug!(path = %slot.path, %name, len = data.len(), "Resolved upload");

        self.attachments.push(Attachment {
            name: name.clone(),
            file_name: stream.file_name.clone(),
            mime_type: stream.mime_type.clone(),
            data,
        });
        *slot.file = InputFile::Attached(name);
        Ok(())
    }

    /// Check the `attach://` references left in `slots` after resolution.
    ///
    /// Every reference must name exactly one resolved part, and no two slots
    /// may share a part. This catches [`InputFile::Attached`] values the
    /// caller built or decoded instead of letting the resolver produce them.
    pub fn check_references<'a>(
        &self,
        slots: impl IntoIterator<Item = FileSlot<'a>>,
    ) -> Result<(), CodecError> {
        let mut seen = HashSet::new();
        for slot in slots {
            let InputFile::Attached(name) = &*slot.file else {
                continue;
            };
            if !seen.insert(name.clone()) {
                return Err(CodecError::DuplicateAttachmentName { name: name.clone() });
            }
            if !self.attachments.iter().any(|attachment| &attachment.name == name) {
                return Err(CodecError::AttachmentUnavailable {
                    name: name.clone(),
                    reason: format!("no attachment part for `{}`", slot.path),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    pub fn into_attachments(self) -> Vec<Attachment> {
        self.attachments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn test_inline_references_encode_as_strings() {
        assert_eq!(
            codec::encode_value(&InputFile::file_id("AgACAgIAAx")).unwrap(),
            json!("AgACAgIAAx")
        );
        assert_eq!(
            codec::encode_value(&InputFile::url("https://example.org/a.png")).unwrap(),
            json!("https://example.org/a.png")
        );
    }

    #[test]
    fn test_unresolved_upload_refuses_to_encode() {
        let err = codec::encode_value(&InputFile::memory(&b"abc"[..], "a.txt")).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn test_decode_classifies_strings() {
        let url: InputFile = codec::decode(json!("https://example.org/a.png")).unwrap();
        assert_eq!(url, InputFile::url("https://example.org/a.png"));
        let id: InputFile = codec::decode(json!("BQACAgIAAx")).unwrap();
        assert_eq!(id, InputFile::file_id("BQACAgIAAx"));
        let attached: InputFile = codec::decode(json!("attach://photo_0")).unwrap();
        assert_eq!(attached, InputFile::Attached("photo_0".to_string()));
    }

    #[test]
    fn test_url_shaped_file_id_decodes_as_url() {
        let id = InputFile::file_id("https://x/y");
        let back: InputFile = codec::decode(codec::encode_value(&id).unwrap()).unwrap();
        assert_eq!(back, InputFile::url("https://x/y"));
        assert_eq!(back.as_inline(), id.as_inline());
    }

    #[test]
    fn test_attachment_name_sanitizes_path() {
        assert_eq!(attachment_name("media.1.thumbnail", 3), "media_1_thumbnail_3");
        assert_eq!(attachment_name("photo", 0), "photo_0");
    }

    #[test]
    fn test_resolver_swaps_uploads_only() {
        let mut photo = InputFile::memory(&b"png"[..], "p.png").with_mime_type("image/png");
        let mut thumb = InputFile::file_id("thumb-id");
        let mut resolver = FileResolver::new();
        resolver
            .resolve([FileSlot::new("photo", &mut photo), FileSlot::new("thumbnail", &mut thumb)])
            .unwrap();

        assert_eq!(photo, InputFile::Attached("photo_0".to_string()));
        assert_eq!(thumb, InputFile::file_id("thumb-id"));
        let attachments = resolver.into_attachments();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].mime_type, "image/png");
        assert_eq!(&attachments[0].data[..], b"png");
    }

    #[test]
    fn test_reader_is_single_use() {
        let upload = InputFile::reader(Cursor::new(b"once".to_vec()), "once.bin");
        let mut first = upload.clone();
        let mut second = upload;

        let mut resolver = FileResolver::new();
        resolver.resolve([FileSlot::new("document", &mut first)]).unwrap();
        let err = resolver
            .resolve([FileSlot::new("document", &mut second)])
            .unwrap_err();
        assert!(matches!(err, CodecError::AttachmentUnavailable { .. }));
    }

    #[test]
    fn test_check_references_accepts_resolved_slots() {
        let mut photo = InputFile::memory(&b"png"[..], "p.png");
        let mut thumb = InputFile::url("https://example.org/t.png");
        let mut resolver = FileResolver::new();
        resolver.resolve([FileSlot::new("photo", &mut photo)]).unwrap();
        resolver
            .check_references([
                FileSlot::new("photo", &mut photo),
                FileSlot::new("thumbnail", &mut thumb),
            ])
            .unwrap();
    }

    #[test]
    fn test_check_references_rejects_foreign_names() {
        let mut ghost = InputFile::Attached("ghost".to_string());
        let err = FileResolver::new()
            .check_references([FileSlot::new("photo", &mut ghost)])
            .unwrap_err();
        match err {
            CodecError::AttachmentUnavailable { name, .. } => assert_eq!(name, "ghost"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_path_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut missing = InputFile::path(dir.path().join("nope.jpg"));
        let err = FileResolver::new()
            .resolve([FileSlot::new("photo", &mut missing)])
            .unwrap_err();
        match err {
            CodecError::AttachmentUnavailable { name, .. } => assert_eq!(name, "photo_0"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_path_upload_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, b"hello").unwrap();

        let mut doc = InputFile::path(&path);
        let mut resolver = FileResolver::new();
        resolver.resolve([FileSlot::new("document", &mut doc)]).unwrap();
        let attachments = resolver.into_attachments();
        assert_eq!(attachments[0].file_name, "doc.txt");
        assert_eq!(&attachments[0].data[..], b"hello");
    }
}
