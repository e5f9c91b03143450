//! `wbb posts` command implementation.

use clap::{Args, ValueEnum};
use wbb_api::types::{Category, Post};
use wbb_api::{Collection, Envelope};
use wbb_content::{Bucket, category_kind};
use wbb_lang::Language;

use super::{format_date, replace_failed_section};
use crate::GlobalArgs;
use crate::context::SiteContext;
use crate::error::CliError;
use crate::output::Output;

/// Post bucket selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum BucketArg {
    Featured,
    Research,
    Articles,
    Notices,
}

impl From<BucketArg> for Bucket {
    fn from(arg: BucketArg) -> Self {
        match arg {
            BucketArg::Featured => Self::Featured,
            BucketArg::Research => Self::Research,
            BucketArg::Articles => Self::Articles,
            BucketArg::Notices => Self::Notices,
        }
    }
}

/// Arguments for the posts command.
#[derive(Args)]
pub(crate) struct PostsArgs {
    /// Only list posts in this bucket.
    #[arg(short, long, value_enum, conflicts_with = "details")]
    bucket: Option<BucketArg>,

    /// Maximum number of posts to list.
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Fetch the full post listing (`posts/details`) instead of the cached summary.
    #[arg(long)]
    details: bool,
}

impl PostsArgs {
    /// Execute the posts command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the detailed listing is malformed.
    pub(crate) fn execute(self, global: &GlobalArgs, version: &str) -> Result<(), CliError> {
        let output = Output::new();
        let site = SiteContext::open(global, version)?;
        let lang = site.language.current();
        let snapshot = site.loader.load_all();

        if self.details {
            let envelope: Envelope<Post> = site
                .loader
                .client()
                .fetch_collection(Collection::PostDetails)
                .map_err(|e| CliError::Content(e.to_string()))?;
            if let Some(message) = envelope.failure_message() {
                output.notice(&message);
                return Ok(());
            }
            let mut posts: Vec<&Post> = envelope.items.iter().collect();
            if let Some(limit) = self.limit {
                posts.truncate(limit);
            }
            print_posts(&output, &posts, &snapshot.categories, lang);
            return Ok(());
        }

        if replace_failed_section(&output, &snapshot, Collection::Posts, lang) {
            return Ok(());
        }
        let posts: Vec<&Post> = match (self.bucket, self.limit) {
            (Some(BucketArg::Notices), Some(limit)) => snapshot.latest_notices(limit),
            (bucket, limit) => {
                let mut posts = match bucket {
                    Some(bucket) => snapshot.bucket(bucket.into()),
                    None => snapshot.posts.iter().collect(),
                };
                if let Some(limit) = limit {
                    posts.truncate(limit);
                }
                posts
            }
        };
        print_posts(&output, &posts, &snapshot.categories, lang);
        Ok(())
    }
}

fn print_posts(output: &Output, posts: &[&Post], categories: &[Category], lang: Language) {
    if posts.is_empty() {
        output.warning("No posts");
        return;
    }
    for post in posts {
        let kind = category_kind(post, categories).unwrap_or_default();
        output.line_with_note(
            &post_line(post, lang),
            &format!("{kind} {}", format_date(post.created_at)),
        );
    }
}

/// `<slug or id>  <title>` for one post.
fn post_line(post: &Post, lang: Language) -> String {
    let key = if post.slug.is_empty() {
        post.id.to_string()
    } else {
        post.slug.clone()
    };
    let title = post.title.get(lang);
    if title.is_empty() {
        format!("{key}  Untitled")
    } else {
        format!("{key}  {title}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wbb_api::types::Id;
    use wbb_lang::Localized;

    fn post(slug: &str, en: &str, bn: &str) -> Post {
        Post {
            id: Id::new("p-1"),
            slug: slug.to_owned(),
            title: Localized::new(en.to_owned(), bn.to_owned()),
            content: Localized::default(),
            cover_img: None,
            created_at: None,
            category: None,
            pdfs: Vec::new(),
            pages: Vec::new(),
            images: Vec::new(),
            is_featured: false,
        }
    }

    #[test]
    fn test_post_line_uses_language_with_fallback() {
        assert_eq!(post_line(&post("report", "Report", "প্রতিবেদন"), Language::Bn), "report  প্রতিবেদন");
        assert_eq!(post_line(&post("report", "Report", ""), Language::Bn), "report  Report");
    }

    #[test]
    fn test_post_line_without_slug_or_title() {
        assert_eq!(post_line(&post("", "", ""), Language::En), "p-1  Untitled");
    }
}
