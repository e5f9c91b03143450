use serde::Deserialize;
use wbb_lang::Localized;

use super::id::{Id, resolve_id};

/// A home page banner slide.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBanner")]
pub struct Banner {
    pub id: Id,
    pub image_url: String,
    pub title: Localized<String>,
    pub description: Localized<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBanner {
    #[serde(rename = "_id", default)]
    underscore: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default, alias = "image", alias = "url")]
    image_url: Option<String>,
    #[serde(default)]
    title: Localized<String>,
    #[serde(default)]
    description: Localized<String>,
}

impl TryFrom<RawBanner> for Banner {
    type Error = String;

    fn try_from(raw: RawBanner) -> Result<Self, Self::Error> {
        Ok(Self {
            id: resolve_id(raw.underscore, raw.id, "banner")?,
            image_url: raw.image_url.unwrap_or_default(),
            title: raw.title,
            description: raw.description,
        })
    }
}

/// Media type of a gallery item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    /// Parse a wire value (`image`, `video`); anything else is [`MediaKind::Other`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Other,
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Other => "other",
        }
    }
}

/// A photo or video in the media gallery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawGalleryItem")]
pub struct GalleryItem {
    pub id: Id,
    pub url: String,
    pub file_name: String,
    pub kind: MediaKind,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGalleryItem {
    #[serde(rename = "_id", default)]
    underscore: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    file_type: Option<String>,
}

impl TryFrom<RawGalleryItem> for GalleryItem {
    type Error = String;

    fn try_from(raw: RawGalleryItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: resolve_id(raw.underscore, raw.id, "gallery item")?,
            url: raw.url.unwrap_or_default(),
            file_name: raw.file_name.unwrap_or_default(),
            kind: raw
                .file_type
                .as_deref()
                .map_or(MediaKind::Other, MediaKind::parse),
        })
    }
}
