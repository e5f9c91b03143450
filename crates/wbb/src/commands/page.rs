//! `wbb page` command implementation.

use clap::Args;

use super::require_found;
use crate::GlobalArgs;
use crate::context::SiteContext;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the page command.
#[derive(Args)]
pub(crate) struct PageArgs {
    /// Site route or slug, e.g. `/pages/about` or `about`.
    route: String,

    /// Print the template CSS as well.
    #[arg(long)]
    css: bool,
}

impl PageArgs {
    /// Execute the page command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or its content is invalid.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let site = SiteContext::open(global, version)?;
        let lang = site.language.current();

        let view = require_found(site.loader.page_view(&self.route, lang))?;

        let title = if view.page.name.is_empty() {
            &view.page.slug
        } else {
            &view.page.name
        };
        output.heading(title);
        output.separator();

        match &view.template {
            Some(template) => {
                output.line(&template.html);
                if self.css && !template.css.is_empty() {
                    output.heading("CSS");
                    output.line(&template.css);
                }
                for asset in &template.assets {
                    output.line_with_note(&asset.src, &asset.kind);
                }
            }
            None => output.warning("Content coming soon"),
        }

        if !view.related_posts.is_empty() {
            output.heading("Related Content");
            for post in &view.related_posts {
                output.line_with_note(post.title.get(lang), &format!("/posts/{}", post.slug));
            }
        }
        Ok(())
    }
}
