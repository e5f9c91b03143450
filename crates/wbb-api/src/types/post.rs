use chrono::{DateTime, Utc};
use serde::Deserialize;
use wbb_lang::Localized;

use super::category::{CategoryRef, RawCategoryRef};
use super::id::{Id, RawRef, resolve_id};
use super::time::deserialize_optional_datetime;
use crate::slug::normalize_slug;

/// A published post (news, article, research, notice).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawPost")]
pub struct Post {
    pub id: Id,
    /// Normalized slug (no leading/trailing slashes).
    pub slug: String,
    pub title: Localized<String>,
    pub content: Localized<String>,
    /// Cover image URL.
    pub cover_img: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub category: Option<CategoryRef>,
    pub pdfs: Vec<PdfAttachment>,
    /// Ids of pages this post is associated with.
    pub pages: Vec<Id>,
    pub images: Vec<PostImage>,
    pub is_featured: bool,
}

impl Post {
    /// Whether the post is linked to the page with `page_id`.
    pub fn references_page(&self, page_id: &Id) -> bool {
        self.pages.iter().any(|id| id == page_id)
    }
}

/// A PDF attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPdf")]
pub struct PdfAttachment {
    pub id: Id,
    pub file_name: String,
    pub title: Option<Localized<String>>,
    pub description: Option<Localized<String>>,
    /// Download URL; defaults to the public download endpoint for `id`.
    pub url: String,
}

/// An image in a post's gallery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPostImage")]
pub struct PostImage {
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPost {
    #[serde(rename = "_id", default)]
    underscore: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    title: Localized<String>,
    #[serde(default)]
    content: Localized<String>,
    #[serde(default)]
    cover_img: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    category: Option<RawCategoryRef>,
    #[serde(default)]
    category_id: Option<Id>,
    #[serde(default)]
    pdfs: Option<Vec<PdfAttachment>>,
    #[serde(default)]
    pages: Option<Vec<RawRef>>,
    #[serde(default)]
    images: Option<Vec<PostImage>>,
    #[serde(default)]
    is_featured: Option<bool>,
}

impl TryFrom<RawPost> for Post {
    type Error = String;

    fn try_from(raw: RawPost) -> Result<Self, Self::Error> {
        let category = match (raw.category, raw.category_id) {
            (Some(category), _) => Some(category.into_ref()),
            (None, Some(id)) => Some(CategoryRef::by_id(id)),
            (None, None) => None,
        };

        Ok(Self {
            id: resolve_id(raw.underscore, raw.id, "post")?,
            slug: normalize_slug(raw.slug.as_deref().unwrap_or_default()).to_owned(),
            title: raw.title,
            content: raw.content,
            cover_img: raw.cover_img.filter(|url| !url.is_empty()),
            created_at: raw.created_at,
            category,
            pdfs: raw.pdfs.unwrap_or_default(),
            pages: raw
                .pages
                .unwrap_or_default()
                .into_iter()
                .filter_map(RawRef::into_id)
                .collect(),
            images: raw.images.unwrap_or_default(),
            is_featured: raw.is_featured.unwrap_or(false),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPdf {
    #[serde(rename = "_id", default)]
    underscore: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default, alias = "filename")]
    file_name: Option<String>,
    #[serde(default)]
    title: Option<Localized<String>>,
    #[serde(default)]
    description: Option<Localized<String>>,
    #[serde(default)]
    url: Option<String>,
}

impl TryFrom<RawPdf> for PdfAttachment {
    type Error = String;

    fn try_from(raw: RawPdf) -> Result<Self, Self::Error> {
        let id = resolve_id(raw.underscore, raw.id, "pdf")?;
        let url = raw
            .url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("/public/download/pdf/{id}"));
        Ok(Self {
            file_name: raw.file_name.unwrap_or_else(|| format!("{id}.pdf")),
            title: raw.title,
            description: raw.description,
            url,
            id,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPostImage {
    #[serde(default, alias = "url")]
    image_url: Option<String>,
    #[serde(default)]
    caption: Option<String>,
}

impl TryFrom<RawPostImage> for PostImage {
    type Error = String;

    fn try_from(raw: RawPostImage) -> Result<Self, Self::Error> {
        let url = raw
            .image_url
            .filter(|url| !url.is_empty())
            .ok_or("post image is missing 'imageUrl'")?;
        Ok(Self {
            url,
            caption: raw.caption.filter(|c| !c.trim().is_empty()),
        })
    }
}
