//! `wbb menu` command implementation.

use clap::Args;
use wbb_api::Collection;
use wbb_content::MenuNode;
use wbb_lang::Language;

use super::replace_failed_section;
use crate::GlobalArgs;
use crate::context::SiteContext;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the menu command.
#[derive(Args)]
pub(crate) struct MenuArgs {
    /// Keep API order instead of sorting siblings by `order`.
    #[arg(long)]
    unsorted: bool,
}

impl MenuArgs {
    /// Execute the menu command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let site = SiteContext::open(global, version)?;
        let lang = site.language.current();
        let snapshot = site.loader.load_all();
        if replace_failed_section(&output, &snapshot, Collection::Menu, lang) {
            return Ok(());
        }

        let menus = if self.unsorted {
            snapshot.menus.clone()
        } else {
            snapshot.sorted_menus()
        };
        if menus.is_empty() {
            output.warning("Menu is empty");
        }

        let mut lines = Vec::new();
        render_tree(&menus, lang, 0, &mut lines);
        for (text, href) in lines {
            output.line_with_note(&text, &href);
        }
        Ok(())
    }
}

/// Flatten the tree into indented `(title, href)` lines.
fn render_tree(nodes: &[MenuNode], lang: Language, depth: usize, lines: &mut Vec<(String, String)>) {
    for node in nodes {
        let title = node.title.get(lang);
        let title = if title.is_empty() { node.slug.as_str() } else { title.as_str() };
        lines.push((format!("{}{title}", "  ".repeat(depth)), node.href.clone()));
        render_tree(&node.children, lang, depth + 1, lines);
    }
}
