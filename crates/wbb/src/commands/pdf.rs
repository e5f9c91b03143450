//! `wbb pdf` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use wbb_api::types::{Id, Post};

use crate::GlobalArgs;
use crate::context::SiteContext;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pdf command.
#[derive(Args)]
pub(crate) struct PdfArgs {
    /// Attachment id.
    id: String,

    /// Output file (default: the attachment's file name in the current directory).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl PdfArgs {
    /// Execute the pdf command.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the file cannot be written.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let site = SiteContext::open(global, version)?;
        let id = Id::new(self.id.trim());

        let target = match self.output {
            Some(path) => path,
            None => {
                let snapshot = site.loader.load_all();
                PathBuf::from(default_file_name(&snapshot.posts, &id))
            }
        };

        output.info(&format!("Downloading {id}..."));
        let bytes = site.loader.client().download_pdf(&id)?;
        std::fs::write(&target, &bytes)?;

        output.success(&format!(
            "Saved {} ({} bytes)",
            target.display(),
            bytes.len()
        ));
        Ok(())
    }
}

/// File name of the attachment with `id`, or `<id>.pdf`.
///
/// Only the final path component of a server-provided name is used.
fn default_file_name(posts: &[Post], id: &Id) -> String {
    posts
        .iter()
        .flat_map(|post| &post.pdfs)
        .find(|pdf| &pdf.id == id)
        .and_then(|pdf| Path::new(&pdf.file_name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map_or_else(|| format!("{id}.pdf"), str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn posts() -> Vec<Post> {
        serde_json::from_str(
            r#"[
                {"_id": "a", "pdfs": [{"id": "f1", "fileName": "annual-report.pdf"}]},
                {"_id": "b", "pdfs": [{"id": "f2", "fileName": "../../etc/passwd"}]},
                {"_id": "c", "pdfs": [{"id": "f3"}]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_default_file_name_from_attachment() {
        assert_eq!(default_file_name(&posts(), &Id::new("f1")), "annual-report.pdf");
        assert_eq!(default_file_name(&posts(), &Id::new("f3")), "f3.pdf");
    }

    #[test]
    fn test_default_file_name_strips_directories() {
        assert_eq!(default_file_name(&posts(), &Id::new("f2")), "passwd");
    }

    #[test]
    fn test_default_file_name_unknown_id() {
        assert_eq!(default_file_name(&posts(), &Id::new("zz")), "zz.pdf");
    }
}
