//! `wbb post` command implementation.

use clap::Args;
use wbb_content::category_kind;

use super::{format_date, require_found};
use crate::GlobalArgs;
use crate::context::SiteContext;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the post command.
#[derive(Args)]
pub(crate) struct PostArgs {
    /// Post slug.
    slug: String,
}

impl PostArgs {
    /// Execute the post command.
    ///
    /// # Errors
    ///
    /// Returns an error if the post does not exist or the request fails.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let site = SiteContext::open(global, version)?;
        let lang = site.language.current();

        let view = require_found(site.loader.post_view(&self.slug))?;
        let post = &view.post;
        let snapshot = site.loader.snapshot();

        output.heading(post.title.get(lang));
        let kind = category_kind(post, &snapshot.categories).unwrap_or_default();
        output.line_with_note(&format_date(post.created_at), &kind);
        if let Some(cover) = &post.cover_img {
            output.line_with_note(cover, "cover");
        }
        output.separator();
        output.line(post.content.get(lang));

        for image in &post.images {
            output.line_with_note(&image.url, image.caption.as_deref().unwrap_or_default());
        }

        if !post.pdfs.is_empty() {
            output.heading("Attachments");
            for pdf in &post.pdfs {
                let title = pdf
                    .title
                    .as_ref()
                    .map(|t| t.get(lang).as_str())
                    .filter(|t| !t.is_empty())
                    .unwrap_or(&pdf.file_name);
                output.line_with_note(title, &format!("wbb pdf {}", pdf.id));
            }
        }

        if !view.related.is_empty() {
            output.heading("Related Content");
            for related in &view.related {
                output.line_with_note(related.title.get(lang), &format!("/posts/{}", related.slug));
            }
        }
        Ok(())
    }
}
