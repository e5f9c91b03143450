//! Page and post detail views.
//!
//! A view combines a detail fetch with data from the loaded snapshot:
//! the parsed template for the active language and the posts related to
//! the record. Every view call takes a request ticket first, so a view
//! that finishes after a newer one was requested resolves to
//! [`Detail::Superseded`].

use std::sync::LazyLock;

use regex::Regex;
use wbb_api::types::{Category, Page, Post, TemplateContent};
use wbb_api::{Collection, DetailResult, TemplateError};
use wbb_lang::Language;

use crate::categorize::category_kind;
use crate::loader::ContentLoader;
use crate::tracker::{Detail, RequestTicket};

/// Most related posts shown under a post.
pub const MAX_RELATED_POSTS: usize = 3;

const NEWS_GROUP: &[&str] = &["news", "articles"];
const RESEARCH_GROUP: &[&str] = &["research", "publications"];
const OTHER_GROUP: &[&str] = &["other", "others"];

/// Matches watch, embed, short and `youtu.be` URLs; captures the 11-char video id.
static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .unwrap()
});

/// A page with its rendered template and the posts linked to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub page: Page,
    /// Parsed template, or `None` when the page has no content yet.
    pub template: Option<TemplateContent>,
    /// Posts whose `pages` reference this page, in API order.
    pub related_posts: Vec<Post>,
}

/// A post with related posts from the same category group.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub post: Post,
    pub related: Vec<Post>,
}

impl ContentLoader {
    /// Resolve a site route to a page view.
    ///
    /// The route is matched against the loaded pages first; unknown routes
    /// are `NotFound` without a detail request.
    pub fn page_view(&self, route: &str, lang: Language) -> Detail<PageView> {
        let ticket = self.views.issue();
        self.resolve_page_view(ticket, route, lang)
    }

    /// Fetch a post by slug with up to [`MAX_RELATED_POSTS`] related posts.
    pub fn post_view(&self, slug: &str) -> Detail<PostView> {
        let ticket = self.views.issue();
        self.resolve_post_view(ticket, slug)
    }

    pub(crate) fn resolve_page_view(
        &self,
        ticket: RequestTicket,
        route: &str,
        lang: Language,
    ) -> Detail<PageView> {
        let snapshot = self.load_all();
        let Some(matching) = snapshot.find_page(route) else {
            if let Some(error) = snapshot.section_error(Collection::Pages) {
                let message = format!("Failed to load pages: {error}");
                return self.views.resolve(ticket, DetailResult::Failed(message));
            }
            tracing::debug!(route, "No page matches route");
            return self.views.resolve(ticket, DetailResult::NotFound("Page not found".to_owned()));
        };

        let result = match self.client().fetch_page(&matching.slug) {
            DetailResult::Found(page) => build_page_view(page, &snapshot.posts, lang),
            DetailResult::NotFound(message) => Detail::NotFound(message),
            DetailResult::Failed(message) => Detail::Failed(message),
        };
        self.views.resolve(ticket, result)
    }

    pub(crate) fn resolve_post_view(&self, ticket: RequestTicket, slug: &str) -> Detail<PostView> {
        let snapshot = self.load_all();
        let result = self.client().fetch_post(slug).map(|post| {
            let related = related_posts(&post, &snapshot.posts, &snapshot.categories);
            PostView { post, related }
        });
        self.views.resolve(ticket, result)
    }
}

fn build_page_view(page: Page, posts: &[Post], lang: Language) -> Detail<PageView> {
    let template = match page.template_content(lang) {
        Ok(template) => Some(template),
        Err(TemplateError::Empty) => None,
        Err(e) => {
            tracing::warn!(page = %page.id, error = %e, "Invalid page template");
            return Detail::Failed(format!("Error parsing page content: {e}"));
        }
    };
    let related_posts = posts
        .iter()
        .filter(|post| post.references_page(&page.id))
        .cloned()
        .collect();
    Detail::Found(PageView {
        page,
        template,
        related_posts,
    })
}

/// Category types treated as related to `kind`.
fn related_group(kind: Option<&str>) -> &'static [&'static str] {
    match kind {
        Some(kind) if NEWS_GROUP.contains(&kind) => NEWS_GROUP,
        Some(kind) if RESEARCH_GROUP.contains(&kind) => RESEARCH_GROUP,
        _ => OTHER_GROUP,
    }
}

/// Up to [`MAX_RELATED_POSTS`] other posts in the same category group,
/// newest first. Posts without a date sort last.
pub fn related_posts(post: &Post, posts: &[Post], categories: &[Category]) -> Vec<Post> {
    let group = related_group(category_kind(post, categories).as_deref());

    let mut related: Vec<&Post> = posts
        .iter()
        .filter(|candidate| candidate.id != post.id)
        .filter(|candidate| {
            category_kind(candidate, categories).is_some_and(|kind| group.contains(&kind.as_str()))
        })
        .collect();
    related.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    related.into_iter().take(MAX_RELATED_POSTS).cloned().collect()
}

/// Extract the video id from a YouTube URL.
pub fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wbb_api::types::Id;
    use wbb_api::{ApiClient, MockTransport, Transport};

    use super::*;
    use crate::loader::ContentLoaderConfig;

    fn post(value: serde_json::Value) -> Post {
        serde_json::from_value(value).unwrap()
    }

    fn site() -> MockTransport {
        MockTransport::new()
            .with_json(
                "public/posts",
                json!({"success": true, "posts": [
                    {"_id": "a", "slug": "a", "pages": [{"_id": "p1"}], "category": {"type": "news"}},
                    {"_id": "b", "slug": "b", "pages": ["p2"], "category": {"type": "articles"}},
                    {"_id": "c", "slug": "c", "pages": ["p1"], "category": {"type": "research"}}
                ]}),
            )
            .with_json(
                "public/pages",
                json!({"success": true, "pages": [
                    {"_id": "p1", "slug": "/about/"},
                    {"_id": "p2", "slug": "empty"},
                    {"_id": "p3", "slug": "broken"}
                ]}),
            )
            .with_json(
                "public/pages/about",
                json!({"success": true, "page": {
                    "_id": "p1",
                    "slug": "about",
                    "template": {
                        "en": {"content": "{\"html\": \"<title>About</title><h1>About</h1>\", \"css\": \"h1{}\"}"},
                        "bn": {"content": ""}
                    }
                }}),
            )
            .with_json(
                "public/pages/empty",
                json!({"success": true, "page": {"_id": "p2", "slug": "empty"}}),
            )
            .with_json(
                "public/pages/broken",
                json!({"success": true, "page": {
                    "_id": "p3",
                    "slug": "broken",
                    "template": {"en": {"content": "<h1>not json</h1>"}}
                }}),
            )
            .with_json(
                "public/posts/a",
                json!({"success": true, "post": {"_id": "a", "slug": "a", "category": {"type": "news"}}}),
            )
    }

    fn loader(transport: &Arc<MockTransport>) -> ContentLoader {
        let client = ApiClient::with_transport(
            "http://cms.test/api",
            Arc::clone(transport) as Arc<dyn Transport>,
        );
        ContentLoader::new(
            client,
            ContentLoaderConfig {
                cache_ttl: Duration::from_secs(300),
            },
        )
    }

    #[test]
    fn test_page_view_with_template_and_related_posts() {
        let transport = Arc::new(site());
        let view = loader(&transport)
            .page_view("/pages/about/", Language::En)
            .found()
            .unwrap();

        let template = view.template.unwrap();
        assert_eq!(template.html, "<h1>About</h1>");
        assert_eq!(template.css, "h1{}");
        let related: Vec<_> = view.related_posts.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(related, vec!["a", "c"]);
    }

    #[test]
    fn test_page_view_bengali_falls_back_to_english() {
        let transport = Arc::new(site());
        let view = loader(&transport).page_view("about", Language::Bn).found().unwrap();
        assert_eq!(view.template.unwrap().html, "<h1>About</h1>");
    }

    #[test]
    fn test_page_view_without_template_is_coming_soon() {
        let transport = Arc::new(site());
        let view = loader(&transport).page_view("/empty", Language::En).found().unwrap();
        assert_eq!(view.template, None);
        assert_eq!(view.related_posts.len(), 1);
    }

    #[test]
    fn test_page_view_invalid_template_fails() {
        let transport = Arc::new(site());
        let detail = loader(&transport).page_view("/pages/broken", Language::En);
        assert!(
            matches!(&detail, Detail::Failed(message) if message.starts_with("Error parsing page content:")),
            "{detail:?}"
        );
    }

    #[test]
    fn test_page_view_unknown_route_skips_detail_request() {
        let transport = Arc::new(site());
        let detail = loader(&transport).page_view("/pages/missing", Language::En);

        assert_eq!(detail, Detail::NotFound("Page not found".to_owned()));
        assert_eq!(transport.calls("public/pages/missing"), 0);
    }

    #[test]
    fn test_page_view_reports_failed_pages_collection() {
        let transport = Arc::new(site().with_error("public/pages", "connection refused"));
        let detail = loader(&transport).page_view("/pages/about", Language::En);

        assert_eq!(
            detail,
            Detail::Failed("Failed to load pages: Transport error: connection refused".to_owned())
        );
        assert_eq!(transport.calls("public/pages/about"), 0);
    }

    #[test]
    fn test_page_view_root_route_is_not_found() {
        let transport = Arc::new(site());
        let detail = loader(&transport).page_view("/", Language::En);
        assert_eq!(detail, Detail::NotFound("Page not found".to_owned()));
    }

    #[test]
    fn test_page_view_detail_404() {
        let transport = Arc::new(site().with_status("public/pages/about", 404, "Not Found"));
        let detail = loader(&transport).page_view("about", Language::En);
        assert_eq!(detail, Detail::NotFound("Page not found".to_owned()));
    }

    #[test]
    fn test_stale_page_view_is_superseded() {
        let transport = Arc::new(site());
        let loader = loader(&transport);

        let stale = loader.views.issue();
        let _newer = loader.views.issue();

        let detail = loader.resolve_page_view(stale, "about", Language::En);
        assert_eq!(detail, Detail::Superseded);
    }

    #[test]
    fn test_post_view_with_related() {
        let transport = Arc::new(site());
        let view = loader(&transport).post_view("/a/").found().unwrap();

        assert_eq!(view.post.id, Id::new("a"));
        let related: Vec<_> = view.related.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(related, vec!["b"]);
    }

    #[test]
    fn test_post_view_not_found() {
        let transport = Arc::new(site());
        let detail = loader(&transport).post_view("gone");
        assert_eq!(detail, Detail::NotFound("Post not found".to_owned()));
    }

    #[test]
    fn test_stale_post_view_is_superseded() {
        let transport = Arc::new(site());
        let loader = loader(&transport);

        let stale = loader.views.issue();
        let fresh = loader.views.issue();

        assert_eq!(loader.resolve_post_view(stale, "a"), Detail::Superseded);
        assert!(loader.resolve_post_view(fresh, "a").found().is_some());
    }

    #[test]
    fn test_related_posts_newest_first_capped() {
        let current = post(json!({"_id": "cur", "category": {"type": "Research"}}));
        let posts = vec![
            current.clone(),
            post(json!({"_id": "old", "createdAt": "2023-01-01T00:00:00Z", "category": {"type": "research"}})),
            post(json!({"_id": "undated", "category": {"type": "publications"}})),
            post(json!({"_id": "new", "createdAt": "2024-06-01T00:00:00Z", "category": {"type": "publications"}})),
            post(json!({"_id": "mid", "createdAt": "2024-01-01T00:00:00Z", "category": {"type": "research"}})),
            post(json!({"_id": "news", "createdAt": "2025-01-01T00:00:00Z", "category": {"type": "news"}})),
        ];

        let ids: Vec<_> = related_posts(&current, &posts, &[])
            .iter()
            .map(|p| p.id.to_string())
            .collect();

        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_related_posts_unknown_type_uses_other_group() {
        let current = post(json!({"_id": "cur", "category": {"type": "events"}}));
        let posts = vec![
            post(json!({"_id": "o1", "category": {"type": "others"}})),
            post(json!({"_id": "o2", "category": {"type": "other"}})),
            post(json!({"_id": "e", "category": {"type": "events"}})),
            post(json!({"_id": "none"})),
        ];

        let ids: Vec<_> = related_posts(&current, &posts, &[])
            .iter()
            .map(|p| p.id.to_string())
            .collect();

        assert_eq!(ids, vec!["o1", "o2"]);
    }

    #[test]
    fn test_other_and_others_are_related() {
        let current = post(json!({"_id": "cur", "category": {"type": "other"}}));
        let posts = vec![post(json!({"_id": "x", "category": {"type": "others"}}))];
        assert_eq!(related_posts(&current, &posts, &[]).len(), 1);
        assert_eq!(related_posts(&posts[0], &[current], &[]).len(), 1);
    }

    #[test]
    fn test_related_posts_resolve_category_id() {
        let categories: Vec<Category> =
            serde_json::from_value(json!([{"_id": "1", "type": "news"}])).unwrap();
        let current = post(json!({"_id": "cur", "categoryId": "1"}));
        let posts = vec![post(json!({"_id": "x", "categoryId": 1}))];

        assert_eq!(related_posts(&current, &posts, &categories).len(), 1);
    }

    #[test]
    fn test_youtube_id() {
        assert_eq!(
            youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_id("https://youtu.be/dQw4w9WgXcQ?t=5"), Some("dQw4w9WgXcQ"));
        assert_eq!(
            youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(youtube_id("https://vimeo.com/123456"), None);
        assert_eq!(youtube_id("https://youtu.be/short"), None);
    }
}
