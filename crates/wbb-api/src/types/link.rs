use serde::Deserialize;
use wbb_lang::Localized;

use super::id::{Id, resolve_id};

/// Footer column a link is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkPosition {
    Left,
    Center,
    Right,
}

impl LinkPosition {
    /// Parse a wire value (`LEFT`, `center`, ...). Unknown values give `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Some(Self::Left),
            "CENTER" => Some(Self::Center),
            "RIGHT" => Some(Self::Right),
            _ => None,
        }
    }

    /// All positions in display order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];
}

/// Publication status of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Published,
    Draft,
    Other(String),
}

impl LinkStatus {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "PUBLISHED" => Self::Published,
            "DRAFT" => Self::Draft,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// A titled external or internal link (footer and social links).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLink")]
pub struct Link {
    pub id: Id,
    pub name: Localized<String>,
    pub url: String,
    pub position: Option<LinkPosition>,
    pub status: Option<LinkStatus>,
}

/// A footer link.
pub type FooterLink = Link;

/// A social network link.
pub type SocialLink = Link;

impl Link {
    /// Whether the link is marked `PUBLISHED`.
    pub fn is_published(&self) -> bool {
        self.status == Some(LinkStatus::Published)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLink {
    #[serde(rename = "_id", default)]
    underscore: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default)]
    name: Option<Localized<String>>,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default)]
    name_bn: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl TryFrom<RawLink> for Link {
    type Error = String;

    fn try_from(raw: RawLink) -> Result<Self, Self::Error> {
        Ok(Self {
            id: resolve_id(raw.underscore, raw.id, "link")?,
            name: super::localized_or_split(raw.name, raw.name_en, raw.name_bn),
            url: raw.url.or(raw.link).unwrap_or_default(),
            position: raw.position.as_deref().and_then(LinkPosition::parse),
            status: raw.status.as_deref().map(LinkStatus::parse),
        })
    }
}
