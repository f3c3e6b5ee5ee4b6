//! Payload assembly: JSON vs multipart, attachment naming and placeholders.

use std::collections::HashSet;
use std::io::Write;

use serde_json::{Value, json};
use tgwire::input_file::{FileResolver, FileSlot};
use tgwire::methods::{SendDocument, SendMediaGroup, SendMessage, SendPhoto};
use tgwire::multipart::{build_payload, build_payload_async};
use tgwire::types::InputMedia;
use tgwire::{CodecError, InputFile, Payload};

fn names(payload: &Payload) -> Vec<String> {
    payload
        .attachments()
        .iter()
        .map(|attachment| attachment.name.clone())
        .collect()
}

mod send_photo {
    use super::*;

    #[test]
    fn test_photo_and_thumbnail_uploads() {
        let mut request = SendPhoto::new(
            42i64,
            InputFile::reader(std::io::Cursor::new(b"photo bytes".to_vec()), "cat.jpg")
                .with_mime_type("image/jpeg"),
        );
        request.thumbnail = Some(InputFile::reader(
            std::io::Cursor::new(b"thumb".to_vec()),
            "cat_thumb.jpg",
        ));
        request.caption = Some("a cat".to_string());

        let payload = build_payload(request).unwrap();
        let Payload::Multipart(multipart) = &payload else {
            panic!("expected multipart, got {payload:?}");
        };

        let attachments = multipart.attachments();
        assert_eq!(attachments.len(), 2);
        assert_ne!(attachments[0].name, attachments[1].name);
        assert_eq!(attachments[0].mime_type, "image/jpeg");
        assert_eq!(&attachments[0].data[..], b"photo bytes");
        assert_eq!(&attachments[1].data[..], b"thumb");

        let body = multipart.body();
        assert_eq!(body["photo"], json!(format!("attach://{}", attachments[0].name)));
        assert_eq!(body["thumbnail"], json!(format!("attach://{}", attachments[1].name)));
        assert_eq!(body["caption"], json!("a cat"));
        assert_eq!(multipart.placeholders(), names(&payload));
    }

    #[test]
    fn test_file_id_and_url_stay_inline() {
        let mut request = SendPhoto::new(42i64, InputFile::file_id("AgACAgIAAxkBAAI"));
        request.thumbnail = Some(InputFile::url("https://example.org/t.jpg"));

        let payload = build_payload(request).unwrap();
        assert!(!payload.is_multipart());
        assert_eq!(
            Value::Object(payload.body().clone()),
            json!({
                "chat_id": 42,
                "photo": "AgACAgIAAxkBAAI",
                "thumbnail": "https://example.org/t.jpg"
            })
        );
    }

    #[test]
    fn test_path_upload_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG").unwrap();

        let payload =
            build_payload(SendPhoto::new("@channel", InputFile::path(file.path()))).unwrap();
        assert!(payload.is_multipart());
        let attachment = &payload.attachments()[0];
        assert_eq!(&attachment.data[..], b"\x89PNG");
        assert_eq!(
            Some(attachment.file_name.as_str()),
            file.path().file_name().and_then(|n| n.to_str())
        );
        assert_eq!(payload.body()["chat_id"], json!("@channel"));
    }

    #[test]
    fn test_missing_path_is_unavailable() {
        let err = build_payload(SendPhoto::new(1i64, InputFile::path("/nonexistent/tgwire.jpg")))
            .unwrap_err();
        match err {
            CodecError::AttachmentUnavailable { name, .. } => assert_eq!(name, "photo_0"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_consumed_reader_is_unavailable() {
        let upload = InputFile::reader(std::io::Cursor::new(vec![1u8, 2, 3]), "blob.bin");
        build_payload(SendDocument::new(1i64, upload.clone())).unwrap();

        let err = build_payload(SendDocument::new(1i64, upload)).unwrap_err();
        assert!(matches!(err, CodecError::AttachmentUnavailable { .. }));
    }
}

mod attached_references {
    use super::*;

    #[test]
    fn test_reference_sharing_a_part_is_rejected() {
        let mut request = SendPhoto::new(1i64, InputFile::Attached("thumbnail_0".to_string()));
        request.thumbnail = Some(InputFile::memory(&b"thumb"[..], "t.jpg"));

        let err = build_payload(request).unwrap_err();
        assert_eq!(
            err,
            CodecError::DuplicateAttachmentName {
                name: "thumbnail_0".to_string()
            }
        );
    }

    #[test]
    fn test_reference_without_part_is_unavailable() {
        let request = SendPhoto::new(1i64, InputFile::Attached("ghost".to_string()));
        match build_payload(request).unwrap_err() {
            CodecError::AttachmentUnavailable { name, .. } => assert_eq!(name, "ghost"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_decoded_reference_is_not_sent_as_json() {
        let photo: InputFile = tgwire::codec::decode(json!("attach://photo_0")).unwrap();
        let err = build_payload(SendDocument::new(1i64, photo)).unwrap_err();
        assert!(matches!(err, CodecError::AttachmentUnavailable { .. }));
    }
}

mod json_only {
    use super::*;

    #[test]
    fn test_request_without_file_fields_is_json() {
        let payload = build_payload(SendMessage::new(7i64, "hello")).unwrap();
        let expected = json!({"chat_id": 7, "text": "hello"});
        assert_eq!(payload, Payload::Json(expected.as_object().unwrap().clone()));
        assert!(payload.attachments().is_empty());
    }

    #[test]
    fn test_unresolved_upload_cannot_be_encoded() {
        let request = SendPhoto::new(1i64, InputFile::memory(&b"x"[..], "x.jpg"));
        let err = tgwire::codec::encode(&request).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }
}

mod media_group {
    use super::*;

    #[test]
    fn test_uploads_across_items_get_distinct_names() {
        let mut video = InputMedia::video(InputFile::memory(&b"v"[..], "clip.mp4"));
        if let InputMedia::Video(item) = &mut video {
            item.thumbnail = Some(InputFile::memory(&b"t"[..], "clip.jpg"));
        }
        let request = SendMediaGroup::new(
            -100i64,
            vec![
                InputMedia::photo(InputFile::memory(&b"p"[..], "a.jpg")),
                InputMedia::photo(InputFile::file_id("AgAD")),
                video,
                InputMedia::document(InputFile::memory(&b"d"[..], "a.jpg")),
            ],
        );

        let payload = build_payload(request).unwrap();
        let names = names(&payload);
        assert_eq!(
            names,
            vec!["media_0_media_0", "media_2_media_1", "media_2_thumbnail_2", "media_3_media_3"]
        );
        assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());

        let media = payload.body()["media"].as_array().unwrap();
        assert_eq!(media[0]["media"], json!("attach://media_0_media_0"));
        assert_eq!(media[1]["media"], json!("AgAD"));
        assert_eq!(media[2]["thumbnail"], json!("attach://media_2_thumbnail_2"));
        assert_eq!(media[3]["type"], json!("document"));
    }

    #[tokio::test]
    async fn test_async_build_matches_sync() {
        let make = || {
            SendMediaGroup::new(
                1i64,
                vec![
                    InputMedia::photo(InputFile::memory(&b"1"[..], "1.jpg")),
                    InputMedia::photo(InputFile::memory(&b"2"[..], "2.jpg")),
                ],
            )
        };
        let sync = build_payload(make()).unwrap();
        let async_built = build_payload_async(make()).await.unwrap();
        assert_eq!(sync, async_built);
    }
}

mod body {
    use super::*;

    #[test]
    fn test_form_builds_for_resolved_request() {
        let payload = build_payload(SendPhoto::new(
            1i64,
            InputFile::memory(&b"jpeg"[..], "p.jpg").with_mime_type("image/jpeg"),
        ))
        .unwrap();
        let Payload::Multipart(multipart) = payload else {
            panic!("expected multipart");
        };
        let form = multipart.into_form().unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[test]
    fn test_resolver_skips_inline_references() {
        let mut inline = InputFile::url("https://example.org/a.png");
        let mut upload = InputFile::memory(&b"a"[..], "a.png");
        let mut resolver = FileResolver::new();
        resolver
            .resolve([
                FileSlot::new("first", &mut inline),
                FileSlot::new("second", &mut upload),
            ])
            .unwrap();
        assert_eq!(resolver.len(), 1);
        assert_eq!(upload, InputFile::Attached("second_0".to_string()));
        assert_eq!(inline, InputFile::url("https://example.org/a.png"));
    }
}
