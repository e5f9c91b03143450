//! CLI command implementations.

pub(crate) mod footer;
pub(crate) mod gallery;
pub(crate) mod lang;
pub(crate) mod menu;
pub(crate) mod page;
pub(crate) mod pdf;
pub(crate) mod post;
pub(crate) mod posts;
pub(crate) mod summary;

pub(crate) use footer::FooterArgs;
pub(crate) use gallery::GalleryArgs;
pub(crate) use lang::LangArgs;
pub(crate) use menu::MenuArgs;
pub(crate) use page::PageArgs;
pub(crate) use pdf::PdfArgs;
pub(crate) use post::PostArgs;
pub(crate) use posts::PostsArgs;
pub(crate) use summary::SummaryArgs;

use chrono::{DateTime, Utc};
use wbb_api::Collection;
use wbb_content::{ContentSnapshot, Detail};
use wbb_lang::Language;

use crate::error::CliError;
use crate::output::Output;

/// Unwrap a detail view or turn it into a CLI error.
fn require_found<T>(detail: Detail<T>) -> Result<T, CliError> {
    match detail {
        Detail::Found(value) => Ok(value),
        Detail::NotFound(message) => Err(CliError::NotFound(message)),
        Detail::Failed(message) => Err(CliError::Content(message)),
        Detail::Superseded => Err(CliError::Content("request was superseded".to_owned())),
    }
}

/// Message shown in place of a section whose collection did not load.
fn section_notice(
    snapshot: &ContentSnapshot,
    collection: Collection,
    lang: Language,
) -> Option<String> {
    let error = snapshot.section_error(collection)?;
    let prefix = match lang {
        Language::En => "Could not load this section",
        Language::Bn => "এই অংশটি লোড করা যায়নি",
    };
    Some(format!("{prefix}: {error}"))
}

/// Print the section notice for `collection`, if any.
///
/// Returns `true` when the section was replaced and must not be rendered.
fn replace_failed_section(
    output: &Output,
    snapshot: &ContentSnapshot,
    collection: Collection,
    lang: Language,
) -> bool {
    match section_notice(snapshot, collection, lang) {
        Some(notice) => {
            output.notice(&notice);
            true
        }
        None => false,
    }
}

/// Human-readable post date.
fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || "Date not available".to_owned(),
        |date| date.format("%-d %B, %Y").to_string(),
    )
}
