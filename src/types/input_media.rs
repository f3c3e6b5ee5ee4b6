//! Media items of outgoing albums and media edits.

use serde::{Deserialize, Serialize};

use super::message::ParseMode;
use crate::input_file::{FileSlot, InputFile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMediaPhoto {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_spoiler: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMediaVideo {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_streaming: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMediaAnimation {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMediaAudio {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMediaDocument {
    pub media: InputFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<InputFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_content_type_detection: Option<bool>,
}

hierarchy! {
    /// One item of a media group.
    pub enum InputMedia("input media", tag = "type") {
        Photo(InputMediaPhoto) = "photo",
        Video(InputMediaVideo) = "video",
        Animation(InputMediaAnimation) = "animation",
        Audio(InputMediaAudio) = "audio",
        Document(InputMediaDocument) = "document",
    }
}

impl InputMedia {
    pub fn photo(media: InputFile) -> Self {
        Self::Photo(InputMediaPhoto {
            media,
            caption: None,
            parse_mode: None,
            has_spoiler: None,
        })
    }

    pub fn video(media: InputFile) -> Self {
        Self::Video(InputMediaVideo {
            media,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            width: None,
            height: None,
            duration: None,
            supports_streaming: None,
        })
    }

    pub fn document(media: InputFile) -> Self {
        Self::Document(InputMediaDocument {
            media,
            thumbnail: None,
            caption: None,
            parse_mode: None,
            disable_content_type_detection: None,
        })
    }

    /// File-valued fields of this item, addressed below `prefix`.
    pub fn input_files(&mut self, prefix: &str) -> Vec<FileSlot<'_>> {
        match self {
            Self::Photo(item) => vec![FileSlot::new(format!("{prefix}.media"), &mut item.media)],
            Self::Video(item) => media_slots(prefix, &mut item.media, item.thumbnail.as_mut()),
            Self::Animation(item) => media_slots(prefix, &mut item.media, item.thumbnail.as_mut()),
            Self::Audio(item) => media_slots(prefix, &mut item.media, item.thumbnail.as_mut()),
            Self::Document(item) => media_slots(prefix, &mut item.media, item.thumbnail.as_mut()),
            Self::Unknown(_) => Vec::new(),
        }
    }
}

fn media_slots<'a>(
    prefix: &str,
    media: &'a mut InputFile,
    thumbnail: Option<&'a mut InputFile>,
) -> Vec<FileSlot<'a>> {
    let mut slots = vec![FileSlot::new(format!("{prefix}.media"), media)];
    slots.extend(FileSlot::optional(format!("{prefix}.thumbnail"), thumbnail));
    slots
}
