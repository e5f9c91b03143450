//! Collection response envelopes.
//!
//! Every collection endpoint answers `{success, message?, <key>: [...]}`.
//! [`Envelope::decode`] is the single place where that shape is checked.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;

/// A public collection endpoint and the key its items arrive under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Posts,
    PostDetails,
    Pages,
    Menu,
    AllFooterLinks,
    FooterLinks,
    SocialLinks,
    Banners,
    Images,
    Categories,
}

impl Collection {
    /// Endpoint path under `public/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::PostDetails => "posts/details",
            Self::Pages => "pages",
            Self::Menu => "menu",
            Self::AllFooterLinks => "all-footer-links",
            Self::FooterLinks => "footer-links",
            Self::SocialLinks => "social-links",
            Self::Banners => "banners",
            Self::Images => "images",
            Self::Categories => "categories",
        }
    }

    /// Response key holding the items.
    pub fn key(self) -> &'static str {
        match self {
            Self::Posts | Self::PostDetails => "posts",
            Self::Pages => "pages",
            Self::Menu => "menus",
            Self::AllFooterLinks | Self::FooterLinks => "footers",
            Self::SocialLinks => "socialLinks",
            Self::Banners => "banners",
            Self::Images => "images",
            Self::Categories => "categories",
        }
    }
}

/// A decoded collection response.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    /// The server's `success` flag. Failed envelopes carry no items.
    pub success: bool,
    /// Server or transport message, if any.
    pub message: Option<String>,
    pub items: Vec<T>,
}

impl<T> Envelope<T> {
    /// A failed envelope with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            items: Vec::new(),
        }
    }

    /// Failure message, or a generic one when the server gave none.
    pub fn failure_message(&self) -> Option<String> {
        if self.success {
            return None;
        }
        Some(
            self.message
                .clone()
                .unwrap_or_else(|| "request was not successful".to_owned()),
        )
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a response object whose items live under `key`.
    ///
    /// A missing or non-boolean `success` counts as `false`. When `success`
    /// is false the items are ignored. When it is true, `key` must hold an
    /// array and every item must decode.
    pub fn decode(value: Value, key: &str) -> Result<Self, DecodeError> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(DecodeError::NotAnObject {
                    found: json_kind(&other),
                });
            }
        };

        let success = object
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);

        if !success {
            return Ok(Self {
                success,
                message,
                items: Vec::new(),
            });
        }

        let raw_items = match object.remove(key) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(DecodeError::NotAnArray {
                    key: key.to_owned(),
                });
            }
            None => {
                return Err(DecodeError::MissingKey {
                    key: key.to_owned(),
                });
            }
        };

        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|source| DecodeError::Item {
                    key: key.to_owned(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<T>, _>>()?;

        Ok(Self {
            success,
            message,
            items,
        })
    }
}

/// Decode a single record from a successful detail response.
pub(crate) fn decode_record<T: DeserializeOwned>(
    mut object: serde_json::Map<String, Value>,
    key: &str,
) -> Result<T, DecodeError> {
    let value = object.remove(key).ok_or_else(|| DecodeError::MissingKey {
        key: key.to_owned(),
    })?;
    serde_json::from_value(value).map_err(|source| DecodeError::Record {
        key: key.to_owned(),
        source,
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
