//! `wbb gallery` command implementation.

use clap::{Args, ValueEnum};
use wbb_api::Collection;
use wbb_api::types::{GalleryItem, MediaKind};
use wbb_content::youtube_id;

use super::replace_failed_section;
use crate::GlobalArgs;
use crate::context::SiteContext;
use crate::error::CliError;
use crate::output::Output;

/// Gallery filter (`/photo` and `/video` routes).
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum KindArg {
    Image,
    Video,
}

impl From<KindArg> for MediaKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Image => Self::Image,
            KindArg::Video => Self::Video,
        }
    }
}

/// Arguments for the gallery command.
#[derive(Args)]
pub(crate) struct GalleryArgs {
    /// Only list items of this kind.
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,
}

impl GalleryArgs {
    /// Execute the gallery command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let site = SiteContext::open(global, version)?;
        let lang = site.language.current();
        let snapshot = site.loader.load_all();
        if replace_failed_section(&output, &snapshot, Collection::Images, lang) {
            return Ok(());
        }

        let items = snapshot.gallery(self.kind.map(MediaKind::from));
        if items.is_empty() {
            output.warning("No gallery items");
        }
        for item in items {
            output.line_with_note(&item.url, &describe(item));
        }
        Ok(())
    }
}

/// Kind label, with the embed URL for YouTube videos.
fn describe(item: &GalleryItem) -> String {
    match item.kind {
        MediaKind::Video => match youtube_id(&item.url) {
            Some(id) => format!("video https://www.youtube.com/embed/{id}"),
            None => "video (Invalid YouTube URL)".to_owned(),
        },
        kind => kind.as_str().to_owned(),
    }
}
