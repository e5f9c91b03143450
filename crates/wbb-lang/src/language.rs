//! Supported language codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language of the rendered site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English, the default and the fallback for missing translations.
    #[default]
    En,
    /// Bengali.
    Bn,
}

impl Language {
    /// Parse a language code.
    ///
    /// Returns `None` for anything other than `en` or `bn`.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Self::En),
            "bn" => Some(Self::Bn),
            _ => None,
        }
    }

    /// Language code as stored in the session.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Bn => "bn",
        }
    }

    /// The other language.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Bn,
            Self::Bn => Self::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
