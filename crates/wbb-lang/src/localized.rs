//! Translated fields.
//!
//! Every human-readable field from the content API arrives as an object
//! keyed by language code. Missing keys (or `null`) decode to the default
//! value, and lookups for Bengali fall back to English when the Bengali
//! value is blank. English never falls back to Bengali.

use serde::{Deserialize, Deserializer, Serialize};

use crate::Language;

/// Values that can be "missing" even when present on the wire.
pub trait Blank {
    /// Whether the value should be treated as an absent translation.
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_none_or(Blank::is_blank)
    }
}

/// A field with English and Bengali values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Localized<T> {
    /// English value.
    pub en: T,
    /// Bengali value.
    pub bn: T,
}

impl<T> Localized<T> {
    /// Create a localized value from both translations.
    pub fn new(en: T, bn: T) -> Self {
        Self { en, bn }
    }

    /// Map both translations.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Localized<U> {
        Localized {
            en: f(self.en),
            bn: f(self.bn),
        }
    }

    /// Borrow the value for `lang` without any fallback.
    pub fn exact(&self, lang: Language) -> &T {
        match lang {
            Language::En => &self.en,
            Language::Bn => &self.bn,
        }
    }
}

impl<T: Blank> Localized<T> {
    /// Value for `lang`, falling back to English when the Bengali value is blank.
    pub fn get(&self, lang: Language) -> &T {
        match lang {
            Language::Bn if !self.bn.is_blank() => &self.bn,
            _ => &self.en,
        }
    }

    /// Whether both translations are blank.
    pub fn is_blank(&self) -> bool {
        self.en.is_blank() && self.bn.is_blank()
    }
}

#[derive(Deserialize)]
struct RawLocalized<T> {
    #[serde(default)]
    en: Option<T>,
    #[serde(default)]
    bn: Option<T>,
}

impl<'de, T> Deserialize<'de> for Localized<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawLocalized<T>>::deserialize(deserializer)?;
        Ok(raw.map_or_else(Self::default, |raw| Self {
            en: raw.en.unwrap_or_default(),
            bn: raw.bn.unwrap_or_default(),
        }))
    }
}
