//! `wbb summary` command implementation.

use clap::Args;
use wbb_content::{Bucket, ContentSnapshot};

use crate::GlobalArgs;
use crate::context::SiteContext;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the summary command.
#[derive(Args)]
pub(crate) struct SummaryArgs {
    /// Bypass the cache window and refetch everything.
    #[arg(long)]
    refresh: bool,
}

impl SummaryArgs {
    /// Execute the summary command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the last load cycle failed.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let site = SiteContext::open(global, version)?;

        output.info(&format!("Loading content from {}...", site.loader.client().base_url()));
        let snapshot = if self.refresh {
            site.loader.force_refresh()
        } else {
            site.loader.load_all()
        };

        print_summary(&output, &snapshot);

        for failure in &snapshot.failures {
            output.warning(&format!(
                "{} not updated: {}",
                failure.collection.endpoint(),
                failure.message
            ));
        }
        if let Some(error) = &snapshot.last_error {
            return Err(CliError::Content(error.clone()));
        }

        if let Some(at) = snapshot.fetched_at {
            output.success(&format!("Loaded at {}", at.to_rfc3339()));
        }
        Ok(())
    }
}

fn print_summary(output: &Output, snapshot: &ContentSnapshot) {
    output.heading("Collections");
    output.line(&format!("  posts         {}", snapshot.posts.len()));
    let with_content = snapshot.pages.iter().filter(|page| page.has_template()).count();
    output.line(&format!(
        "  pages         {} ({with_content} with content)",
        snapshot.pages.len()
    ));
    output.line(&format!("  menu roots    {}", snapshot.menus.len()));
    output.line(&format!("  footer links  {}", snapshot.footer_links.len()));
    output.line(&format!("  social links  {}", snapshot.social_links.len()));
    output.line(&format!("  banners       {}", snapshot.banners.len()));
    output.line(&format!("  gallery       {}", snapshot.gallery.len()));
    output.line(&format!("  categories    {}", snapshot.categories.len()));

    output.heading("Buckets");
    for bucket in Bucket::ALL {
        output.line(&format!(
            "  {:<13} {}",
            bucket.as_str(),
            snapshot.bucket(bucket).len()
        ));
    }
}
