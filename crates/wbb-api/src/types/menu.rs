use serde::Deserialize;
use wbb_lang::Localized;

use super::id::{Id, RawRef, resolve_id};
use crate::slug::normalize_slug;

/// A navigation menu entry as sent by the API.
///
/// The API sends either a pre-nested tree (`children`) or a flat list where
/// each entry names its `parentId`. Tree reconstruction happens in the
/// content loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMenuItem")]
pub struct MenuItem {
    pub id: Id,
    pub title: Localized<String>,
    /// Normalized slug; empty for the home entry or external links.
    pub slug: String,
    /// External URL, if the entry points off-site.
    pub url: Option<String>,
    /// Position among siblings.
    pub order: i64,
    pub parent_id: Option<Id>,
    pub children: Vec<MenuItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMenuItem {
    #[serde(rename = "_id", default)]
    underscore: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default)]
    title: Option<Localized<String>>,
    #[serde(default)]
    title_en: Option<String>,
    #[serde(default)]
    title_bn: Option<String>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default, alias = "parent")]
    parent_id: Option<RawRef>,
    #[serde(default)]
    children: Option<Vec<MenuItem>>,
}

impl TryFrom<RawMenuItem> for MenuItem {
    type Error = String;

    fn try_from(raw: RawMenuItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: resolve_id(raw.underscore, raw.id, "menu item")?,
            title: super::localized_or_split(raw.title, raw.title_en, raw.title_bn),
            slug: normalize_slug(raw.slug.as_deref().unwrap_or_default()).to_owned(),
            url: raw.url.filter(|u| !u.trim().is_empty()),
            order: raw.order.unwrap_or(0),
            parent_id: raw.parent_id.and_then(RawRef::into_id),
            children: raw.children.unwrap_or_default(),
        })
    }
}
