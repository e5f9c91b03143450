use serde::Deserialize;
use wbb_lang::Localized;

use super::id::{Id, RawRef, resolve_id};

/// A post category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCategory")]
pub struct Category {
    /// Category id.
    pub id: Id,
    /// Type tag, e.g. `research`, `news`, `other`.
    pub kind: String,
    /// Display name.
    pub name: Localized<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    #[serde(rename = "_id", default)]
    underscore: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<Localized<String>>,
    #[serde(default)]
    name_en: Option<String>,
    #[serde(default)]
    name_bn: Option<String>,
}

impl TryFrom<RawCategory> for Category {
    type Error = String;

    fn try_from(raw: RawCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: resolve_id(raw.underscore, raw.id, "category")?,
            kind: raw.kind.unwrap_or_default(),
            name: super::localized_or_split(raw.name, raw.name_en, raw.name_bn),
        })
    }
}

/// How a post points at its category.
///
/// Posts either embed the category (`category: {_id, type}`), reference it
/// by id (`category: "c1"` or `categoryId: 1`), or omit it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryRef {
    /// Referenced category id, if known.
    pub id: Option<Id>,
    /// Type tag carried inline, if the category was embedded.
    pub kind: Option<String>,
}

impl CategoryRef {
    /// Reference by id only.
    pub fn by_id(id: impl Into<Id>) -> Self {
        Self {
            id: Some(id.into()),
            kind: None,
        }
    }

    /// Resolve the type tag, looking the id up in `categories` when the
    /// category was not embedded.
    pub fn resolve_kind<'a>(&'a self, categories: &'a [Category]) -> Option<&'a str> {
        if let Some(kind) = self.kind.as_deref().filter(|k| !k.is_empty()) {
            return Some(kind);
        }
        let id = self.id.as_ref()?;
        categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.kind.as_str())
            .filter(|k| !k.is_empty())
    }
}

/// Category field as sent inside a post.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum RawCategoryRef {
    Embedded {
        #[serde(rename = "_id", default)]
        underscore: Option<Id>,
        #[serde(default)]
        id: Option<Id>,
        #[serde(rename = "type", default)]
        kind: Option<String>,
    },
    Bare(RawRef),
}

impl RawCategoryRef {
    pub(super) fn into_ref(self) -> CategoryRef {
        match self {
            Self::Embedded {
                underscore,
                id,
                kind,
            } => CategoryRef {
                id: underscore.or(id),
                kind,
            },
            Self::Bare(raw) => CategoryRef {
                id: raw.into_id(),
                kind: None,
            },
        }
    }
}
