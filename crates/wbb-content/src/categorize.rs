//! Post categorization into derived buckets.
//!
//! Buckets are never stored on the wire; they are recomputed from the post
//! list and the category list on every load cycle. A post's category type
//! is compared case-insensitively against three independent tag groups, so
//! a post may land in several buckets or none. `featured` comes from the
//! post's own flag.

use wbb_api::types::{Category, Post};

const RESEARCH_TYPES: &[&str] = &["research", "publications"];
const ARTICLE_TYPES: &[&str] = &["articles", "news"];
const NOTICE_TYPES: &[&str] = &["other"];

/// A derived post grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Featured,
    Research,
    Articles,
    Notices,
}

impl Bucket {
    /// All buckets in display order.
    pub const ALL: [Self; 4] = [Self::Featured, Self::Research, Self::Articles, Self::Notices];

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Research => "research",
            Self::Articles => "articles",
            Self::Notices => "notices",
        }
    }
}

/// Bucket membership of a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Categorization {
    pub is_featured: bool,
    pub is_research: bool,
    pub is_article: bool,
    pub is_notice: bool,
}

impl Categorization {
    /// Whether the post belongs to `bucket`.
    pub fn contains(self, bucket: Bucket) -> bool {
        match bucket {
            Bucket::Featured => self.is_featured,
            Bucket::Research => self.is_research,
            Bucket::Articles => self.is_article,
            Bucket::Notices => self.is_notice,
        }
    }
}

/// Lower-cased category type of `post`, if it can be resolved.
pub fn category_kind(post: &Post, categories: &[Category]) -> Option<String> {
    post.category
        .as_ref()
        .and_then(|c| c.resolve_kind(categories))
        .map(str::to_lowercase)
}

/// Compute bucket membership for one post.
pub fn categorize(post: &Post, categories: &[Category]) -> Categorization {
    let kind = category_kind(post, categories);
    let in_group = |group: &[&str]| kind.as_deref().is_some_and(|k| group.contains(&k));

    Categorization {
        is_featured: post.is_featured,
        is_research: in_group(RESEARCH_TYPES),
        is_article: in_group(ARTICLE_TYPES),
        is_notice: in_group(NOTICE_TYPES),
    }
}

/// Post indices per bucket, in post order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    featured: Vec<usize>,
    research: Vec<usize>,
    articles: Vec<usize>,
    notices: Vec<usize>,
}

impl Buckets {
    /// Categorize every post.
    pub fn build(posts: &[Post], categories: &[Category]) -> Self {
        let mut buckets = Self::default();
        for (idx, post) in posts.iter().enumerate() {
            let membership = categorize(post, categories);
            for bucket in Bucket::ALL {
                if membership.contains(bucket) {
                    buckets.indices_mut(bucket).push(idx);
                }
            }
        }
        buckets
    }

    /// Indices into the post list for `bucket`.
    pub fn indices(&self, bucket: Bucket) -> &[usize] {
        match bucket {
            Bucket::Featured => &self.featured,
            Bucket::Research => &self.research,
            Bucket::Articles => &self.articles,
            Bucket::Notices => &self.notices,
        }
    }

    fn indices_mut(&mut self, bucket: Bucket) -> &mut Vec<usize> {
        match bucket {
            Bucket::Featured => &mut self.featured,
            Bucket::Research => &mut self.research,
            Bucket::Articles => &mut self.articles,
            Bucket::Notices => &mut self.notices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wbb_api::types::Id;

    fn post(value: serde_json::Value) -> Post {
        serde_json::from_value(value).unwrap()
    }

    fn category(id: &str, kind: &str) -> Category {
        serde_json::from_value(json!({"_id": id, "type": kind})).unwrap()
    }

    #[test]
    fn test_news_is_article_only() {
        let news = post(json!({"_id": "n", "category": {"_id": "c", "type": "news"}}));
        let membership = categorize(&news, &[]);

        assert!(membership.is_article);
        assert!(!membership.is_research);
        assert!(!membership.is_notice);
        assert!(!membership.is_featured);
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let research = post(json!({"_id": "r", "category": {"type": "Publications"}}));
        assert!(categorize(&research, &[]).is_research);
    }

    #[test]
    fn test_unresolvable_category_in_no_bucket() {
        let orphan = post(json!({"_id": "o", "categoryId": 99}));
        let none = post(json!({"_id": "x"}));
        let categories = [category("1", "research")];

        assert_eq!(categorize(&orphan, &categories), Categorization::default());
        assert_eq!(categorize(&none, &categories), Categorization::default());
    }

    #[test]
    fn test_featured_is_independent_of_category() {
        let featured = post(json!({"_id": "f", "isFeatured": true}));
        let membership = categorize(&featured, &[]);
        assert!(membership.is_featured);
        assert!(!membership.is_research && !membership.is_article && !membership.is_notice);
    }

    #[test]
    fn test_other_is_notice() {
        let notice = post(json!({"_id": "n", "category": {"type": "other"}}));
        assert!(categorize(&notice, &[]).is_notice);
    }

    #[test]
    fn test_buckets_from_category_id_lookup() {
        let categories = [category("1", "research")];
        let posts = [post(json!({"id": "a", "categoryId": 1, "isFeatured": true}))];

        let buckets = Buckets::build(&posts, &categories);

        assert_eq!(buckets.indices(Bucket::Featured), &[0]);
        assert_eq!(buckets.indices(Bucket::Research), &[0]);
        assert!(buckets.indices(Bucket::Articles).is_empty());
        assert!(buckets.indices(Bucket::Notices).is_empty());
        assert_eq!(posts[0].id, Id::new("a"));
    }

    #[test]
    fn test_buckets_keep_post_order() {
        let posts = [
            post(json!({"_id": "a", "category": {"type": "news"}})),
            post(json!({"_id": "b", "category": {"type": "research"}})),
            post(json!({"_id": "c", "category": {"type": "articles"}})),
        ];
        let buckets = Buckets::build(&posts, &[]);
        assert_eq!(buckets.indices(Bucket::Articles), &[0, 2]);
        assert_eq!(buckets.indices(Bucket::Research), &[1]);
    }
}
