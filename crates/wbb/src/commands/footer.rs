//! `wbb footer` command implementation.

use clap::Args;
use wbb_api::types::{FooterLink, LinkPosition};
use wbb_api::{Collection, Envelope};
use wbb_content::ContentSnapshot;
use wbb_lang::Language;

use super::replace_failed_section;
use crate::GlobalArgs;
use crate::context::SiteContext;
use crate::error::CliError;
use crate::output::Output;

/// Social networks shown in the footer, in display order.
const SOCIAL_NETWORKS: [&str; 5] = ["Twitter", "Facebook", "LinkedIn", "YouTube", "Instagram"];

/// Arguments for the footer command.
#[derive(Args)]
pub(crate) struct FooterArgs {
    /// Skip social links.
    #[arg(long)]
    no_social: bool,

    /// Read the published links from `footer-links` instead of the cached list.
    #[arg(long)]
    published: bool,
}

fn position_label(position: LinkPosition) -> &'static str {
    match position {
        LinkPosition::Left => "Left",
        LinkPosition::Center => "Center",
        LinkPosition::Right => "Right",
    }
}

impl FooterArgs {
    /// Execute the footer command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the published listing is malformed.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let site = SiteContext::open(global, version)?;
        let lang = site.language.current();
        let snapshot = site.loader.load_all();

        if self.published {
            let envelope: Envelope<FooterLink> = site
                .loader
                .client()
                .fetch_collection(Collection::FooterLinks)
                .map_err(|e| CliError::Content(e.to_string()))?;
            match envelope.failure_message() {
                Some(message) => output.notice(&message),
                None => print_columns(&output, &envelope.items, lang),
            }
        } else if !replace_failed_section(&output, &snapshot, Collection::AllFooterLinks, lang) {
            print_columns(&output, &snapshot.footer_links, lang);
        }

        if !self.no_social {
            output.heading("Social");
            if !replace_failed_section(&output, &snapshot, Collection::SocialLinks, lang) {
                for (name, url) in social_lines(&snapshot, lang) {
                    output.line_with_note(&name, &url);
                }
            }
        }
        Ok(())
    }
}

/// Print published links grouped by footer column.
fn print_columns(output: &Output, links: &[FooterLink], lang: Language) {
    for position in LinkPosition::ALL {
        let column: Vec<&FooterLink> = links
            .iter()
            .filter(|link| link.is_published() && link.position == Some(position))
            .collect();
        if column.is_empty() {
            continue;
        }
        output.heading(position_label(position));
        for link in column {
            output.line_with_note(link.name.get(lang), &link.url);
        }
    }
}

/// `(name, url)` for each known network. Networks without a configured
/// link keep their default name and have no URL.
fn social_lines(snapshot: &ContentSnapshot, lang: Language) -> Vec<(String, String)> {
    SOCIAL_NETWORKS
        .iter()
        .map(|&network| match snapshot.social_link(network) {
            Some(link) => {
                let name = link.name.get(lang);
                let name = if name.is_empty() { network } else { name.as_str() };
                let url = if link.url.is_empty() { "/" } else { link.url.as_str() };
                (name.to_owned(), url.to_owned())
            }
            None => (network.to_owned(), String::new()),
        })
        .collect()
}
