//! Content loading with time-boxed memoization.
//!
//! Provides [`ContentLoader`], which fetches every site collection in
//! parallel, commits each one independently, and serves the committed
//! [`ContentSnapshot`] until the cache window expires.
//!
//! # Thread Safety
//!
//! `ContentLoader` is designed for concurrent access:
//! - `snapshot()` returns `Arc<ContentSnapshot>` with minimal locking (just Arc clone)
//! - `load_all()` uses double-checked locking around the cache window
//! - `force_refresh()` bumps the generation so an in-flight load is not committed
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use wbb_api::ApiClient;
//! use wbb_content::{ContentLoader, ContentLoaderConfig};
//!
//! let client = ApiClient::new("https://cms.example.org/api", Duration::from_secs(30));
//! let loader = ContentLoader::new(client, ContentLoaderConfig::default());
//!
//! let snapshot = loader.load_all();
//! println!("{} posts", snapshot.posts.len());
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde_json::Value;
use wbb_api::types::{
    Banner, Category, FooterLink, GalleryItem, LinkPosition, MediaKind, MenuItem, Page, Post,
    SocialLink,
};
use wbb_api::{ApiClient, Collection, DecodeError, Envelope, failure_envelope};

use crate::categorize::{Bucket, Buckets};
use crate::menu::{MenuNode, build_menu_tree, sort_by_order};
use crate::slug::route_to_slug;
use crate::tracker::RequestTracker;

/// Default cache window (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Collections fetched by every load cycle.
pub const LOADED_COLLECTIONS: [Collection; 8] = [
    Collection::Posts,
    Collection::Pages,
    Collection::Menu,
    Collection::AllFooterLinks,
    Collection::SocialLinks,
    Collection::Banners,
    Collection::Images,
    Collection::Categories,
];

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Configuration for [`ContentLoader`].
#[derive(Clone, Debug)]
pub struct ContentLoaderConfig {
    /// How long a committed snapshot is served without re-fetching.
    pub cache_ttl: Duration,
}

impl Default for ContentLoaderConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// A collection whose last fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionFailure {
    pub collection: Collection,
    pub message: String,
}

/// Immutable view of all loaded site content.
#[derive(Debug, Clone, Default)]
pub struct ContentSnapshot {
    pub posts: Vec<Post>,
    pub pages: Vec<Page>,
    /// Menu tree in API order; see [`crate::sort_by_order`].
    pub menus: Vec<MenuNode>,
    pub footer_links: Vec<FooterLink>,
    pub social_links: Vec<SocialLink>,
    pub banners: Vec<Banner>,
    pub gallery: Vec<GalleryItem>,
    pub categories: Vec<Category>,
    pub(crate) buckets: Buckets,
    /// Collections that failed in the most recent cycle.
    pub failures: Vec<CollectionFailure>,
    /// Set when the most recent cycle failed as a whole.
    pub last_error: Option<String>,
    /// Loader generation that produced the committed data.
    pub generation: u64,
    /// When collections were last committed.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ContentSnapshot {
    /// Whether any cycle has committed data.
    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }

    /// Failure message for `collection` from the most recent cycle.
    pub fn failure(&self, collection: Collection) -> Option<&str> {
        self.failures
            .iter()
            .find(|f| f.collection == collection)
            .map(|f| f.message.as_str())
    }

    /// Why the section backed by `collection` cannot be shown: its own
    /// failure in the last cycle, or the error that failed the whole cycle.
    pub fn section_error(&self, collection: Collection) -> Option<&str> {
        self.failure(collection).or_else(|| self.last_error.as_deref())
    }

    /// Posts in `bucket`, in API order.
    pub fn bucket(&self, bucket: Bucket) -> Vec<&Post> {
        self.buckets
            .indices(bucket)
            .iter()
            .filter_map(|&idx| self.posts.get(idx))
            .collect()
    }

    /// The first `n` notices, in API order.
    pub fn latest_notices(&self, n: usize) -> Vec<&Post> {
        let mut notices = self.bucket(Bucket::Notices);
        notices.truncate(n);
        notices
    }

    /// Page whose slug matches `route` (`/pages/about/`, `/about`, `about`).
    pub fn find_page(&self, route: &str) -> Option<&Page> {
        let slug = route_to_slug(route);
        if slug.is_empty() {
            return None;
        }
        self.pages.iter().find(|page| page.slug == slug)
    }

    /// Published footer links in `position`.
    pub fn footer_links(&self, position: LinkPosition) -> Vec<&FooterLink> {
        self.footer_links
            .iter()
            .filter(|link| link.is_published() && link.position == Some(position))
            .collect()
    }

    /// Social link whose English name matches `name`, ignoring case.
    pub fn social_link(&self, name: &str) -> Option<&SocialLink> {
        self.social_links
            .iter()
            .find(|link| link.name.en.trim().eq_ignore_ascii_case(name.trim()))
    }

    /// Gallery items of `kind`, or all of them.
    pub fn gallery(&self, kind: Option<MediaKind>) -> Vec<&GalleryItem> {
        self.gallery
            .iter()
            .filter(|item| kind.is_none_or(|kind| item.kind == kind))
            .collect()
    }

    /// A copy of the menu tree with siblings ordered by `order`.
    pub fn sorted_menus(&self) -> Vec<MenuNode> {
        let mut menus = self.menus.clone();
        sort_by_order(&mut menus);
        menus
    }
}

/// All collections decoded from one cycle.
pub(crate) struct Fetched {
    posts: Envelope<Post>,
    pages: Envelope<Page>,
    menus: Envelope<MenuItem>,
    footer_links: Envelope<FooterLink>,
    social_links: Envelope<SocialLink>,
    banners: Envelope<Banner>,
    gallery: Envelope<GalleryItem>,
    categories: Envelope<Category>,
}

/// Loads and memoizes site content.
///
/// # Thread Safety
///
/// This struct is designed for concurrent access without external locking:
/// - Uses internal `RwLock<Arc<ContentSnapshot>>` for the current snapshot
/// - Uses `Mutex<()>` for serializing load cycles
/// - Uses `AtomicU64` for the load generation
pub struct ContentLoader {
    client: ApiClient,
    config: ContentLoaderConfig,
    /// Mutex for serializing load cycles.
    load_lock: Mutex<()>,
    /// Current snapshot (atomically swappable).
    current: RwLock<Arc<ContentSnapshot>>,
    /// When the current snapshot was committed; `None` forces a reload.
    loaded_at: RwLock<Option<Instant>>,
    /// Bumped by `force_refresh` to discard overtaken cycles.
    generation: AtomicU64,
    /// Tickets for page/post detail requests.
    pub(crate) views: RequestTracker,
}

impl ContentLoader {
    /// Create a loader with an empty snapshot.
    pub fn new(client: ApiClient, config: ContentLoaderConfig) -> Self {
        Self {
            client,
            config,
            load_lock: Mutex::new(()),
            current: RwLock::new(Arc::new(ContentSnapshot::default())),
            loaded_at: RwLock::new(None),
            generation: AtomicU64::new(0),
            views: RequestTracker::new(),
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Current load generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Get current snapshot without loading.
    pub fn snapshot(&self) -> Arc<ContentSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Return the cached snapshot if it is within the cache window,
    /// otherwise fetch everything.
    ///
    /// Never fails: collection failures are recorded on the snapshot and
    /// a malformed payload keeps the previous snapshot with `last_error` set.
    pub fn load_all(&self) -> Arc<ContentSnapshot> {
        // Fast path: cache fresh
        if let Some(snapshot) = self.fresh_snapshot() {
            tracing::debug!(generation = snapshot.generation, "Content cache hit");
            return snapshot;
        }

        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Double-check after acquiring lock
        if let Some(snapshot) = self.fresh_snapshot() {
            return snapshot;
        }

        self.run_cycle()
    }

    /// Discard the cache window and fetch everything unconditionally.
    ///
    /// A load cycle already in flight is not committed.
    pub fn force_refresh(&self) -> Arc<ContentSnapshot> {
        *self.loaded_at.write().unwrap_or_else(PoisonError::into_inner) = None;
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::info!(generation, "Forcing content refresh");

        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.run_cycle()
    }

    fn fresh_snapshot(&self) -> Option<Arc<ContentSnapshot>> {
        let loaded_at = *self.loaded_at.read().unwrap_or_else(PoisonError::into_inner);
        loaded_at
            .filter(|at| at.elapsed() < self.config.cache_ttl)
            .map(|_| self.snapshot())
    }

    fn run_cycle(&self) -> Arc<ContentSnapshot> {
        let start = Instant::now();
        let generation = self.generation();

        let fetch_start = Instant::now();
        let fetched = self.fetch_all();
        let fetch_ms = elapsed_ms(fetch_start);

        let snapshot = self.commit(generation, fetched);
        tracing::info!(
            generation,
            post_count = snapshot.posts.len(),
            page_count = snapshot.pages.len(),
            failed_collections = snapshot.failures.len(),
            fetch_ms,
            elapsed_ms = elapsed_ms(start),
            "Content loaded"
        );
        snapshot
    }

    /// Fetch every collection in parallel and decode the results.
    pub(crate) fn fetch_all(&self) -> Result<Fetched, DecodeError> {
        let mut raw: HashMap<Collection, Value> = LOADED_COLLECTIONS
            .par_iter()
            .map(|&collection| (collection, self.client.fetch_public(collection.endpoint())))
            .collect();

        Ok(Fetched {
            posts: take(&mut raw, Collection::Posts)?,
            pages: take(&mut raw, Collection::Pages)?,
            menus: take(&mut raw, Collection::Menu)?,
            footer_links: take(&mut raw, Collection::AllFooterLinks)?,
            social_links: take(&mut raw, Collection::SocialLinks)?,
            banners: take(&mut raw, Collection::Banners)?,
            gallery: take(&mut raw, Collection::Images)?,
            categories: take(&mut raw, Collection::Categories)?,
        })
    }

    /// Commit a cycle's result if no newer generation started meanwhile.
    pub(crate) fn commit(
        &self,
        generation: u64,
        fetched: Result<Fetched, DecodeError>,
    ) -> Arc<ContentSnapshot> {
        if self.generation() != generation {
            tracing::info!(
                generation,
                latest = self.generation(),
                "Discarding overtaken content load"
            );
            return self.snapshot();
        }

        let previous = self.snapshot();
        let mut next = (*previous).clone();

        match fetched {
            Ok(fetched) => {
                next.failures.clear();
                next.last_error = None;
                apply(&mut next, fetched);
                next.buckets = Buckets::build(&next.posts, &next.categories);
                next.generation = generation;
                next.fetched_at = Some(Utc::now());
                *self.loaded_at.write().unwrap_or_else(PoisonError::into_inner) =
                    Some(Instant::now());
            }
            Err(e) => {
                tracing::error!(error = %e, "Content load failed");
                next.last_error = Some(e.to_string());
            }
        }

        let next = Arc::new(next);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
        next
    }
}

/// Decode the raw response for `collection`.
fn take<T: serde::de::DeserializeOwned>(
    raw: &mut HashMap<Collection, Value>,
    collection: Collection,
) -> Result<Envelope<T>, DecodeError> {
    let value = raw
        .remove(&collection)
        .unwrap_or_else(|| failure_envelope(collection.endpoint(), "not fetched"));
    Envelope::decode(value, collection.key())
}

/// Commit successful collections; keep previous values for failed ones.
fn apply(snapshot: &mut ContentSnapshot, fetched: Fetched) {
    let failures = &mut snapshot.failures;
    if let Some(posts) = commit_items(fetched.posts, Collection::Posts, failures) {
        snapshot.posts = posts;
    }
    if let Some(pages) = commit_items(fetched.pages, Collection::Pages, failures) {
        snapshot.pages = pages;
    }
    if let Some(menus) = commit_items(fetched.menus, Collection::Menu, failures) {
        snapshot.menus = build_menu_tree(menus);
    }
    if let Some(links) = commit_items(fetched.footer_links, Collection::AllFooterLinks, failures) {
        snapshot.footer_links = links;
    }
    if let Some(links) = commit_items(fetched.social_links, Collection::SocialLinks, failures) {
        snapshot.social_links = links;
    }
    if let Some(banners) = commit_items(fetched.banners, Collection::Banners, failures) {
        snapshot.banners = banners;
    }
    if let Some(gallery) = commit_items(fetched.gallery, Collection::Images, failures) {
        snapshot.gallery = gallery;
    }
    if let Some(categories) = commit_items(fetched.categories, Collection::Categories, failures) {
        snapshot.categories = categories;
    }
}

fn commit_items<T>(
    envelope: Envelope<T>,
    collection: Collection,
    failures: &mut Vec<CollectionFailure>,
) -> Option<Vec<T>> {
    if let Some(message) = envelope.failure_message() {
        tracing::warn!(
            endpoint = collection.endpoint(),
            message = %message,
            "Collection not updated"
        );
        failures.push(CollectionFailure {
            collection,
            message,
        });
        return None;
    }
    Some(envelope.items)
}

#[cfg(test)]
mod tests {
    // Ensure ContentLoader is Send + Sync for use with Arc
    static_assertions::assert_impl_all!(super::ContentLoader: Send, Sync);

    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wbb_api::types::Id;
    use wbb_api::{MockTransport, Transport};

    use super::*;

    /// Mock serving every loaded collection with one item each.
    fn full_site() -> MockTransport {
        MockTransport::new()
            .with_json("csrf-token", json!({"csrfToken": "t"}))
            .with_json(
                "public/posts",
                json!({"success": true, "posts": [
                    {"_id": "a", "slug": "/a/", "categoryId": 1, "isFeatured": true},
                    {"_id": "b", "slug": "b", "category": {"_id": "c2", "type": "news"}}
                ]}),
            )
            .with_json(
                "public/pages",
                json!({"success": true, "pages": [{"_id": "p1", "slug": "/about/", "name": "About"}]}),
            )
            .with_json(
                "public/menu",
                json!({"success": true, "menus": [
                    {"_id": "m1", "slug": "about"},
                    {"_id": "m2", "slug": "team", "parentId": "m1"}
                ]}),
            )
            .with_json(
                "public/all-footer-links",
                json!({"success": true, "footers": [{"_id": "f1", "nameEn": "Contact", "url": "/contact", "position": "LEFT", "status": "PUBLISHED"}]}),
            )
            .with_json(
                "public/social-links",
                json!({"success": true, "socialLinks": [{"_id": "s1", "nameEn": "Facebook", "url": "https://facebook.com/wbb"}]}),
            )
            .with_json(
                "public/banners",
                json!({"success": true, "banners": [{"_id": "b1", "imageUrl": "https://cdn.test/1.png"}]}),
            )
            .with_json(
                "public/images",
                json!({"success": true, "images": [{"id": 1, "url": "https://cdn.test/a.jpg", "fileType": "image"}]}),
            )
            .with_json(
                "public/categories",
                json!({"success": true, "categories": [{"id": 1, "type": "research"}]}),
            )
    }

    fn loader_with(transport: &Arc<MockTransport>, cache_ttl: Duration) -> ContentLoader {
        let client = ApiClient::with_transport(
            "http://cms.test/api",
            Arc::clone(transport) as Arc<dyn Transport>,
        );
        ContentLoader::new(client, ContentLoaderConfig { cache_ttl })
    }

    fn collection_calls(transport: &MockTransport) -> usize {
        LOADED_COLLECTIONS
            .iter()
            .map(|c| transport.calls(&format!("public/{}", c.endpoint())))
            .sum()
    }

    #[test]
    fn test_initial_snapshot_is_empty() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        let snapshot = loader.snapshot();

        assert!(!snapshot.is_loaded());
        assert!(snapshot.posts.is_empty());
        assert_eq!(transport.total_calls(), 0);
    }

    #[test]
    fn test_load_all_commits_every_collection() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        let snapshot = loader.load_all();

        assert!(snapshot.is_loaded());
        assert_eq!(snapshot.posts.len(), 2);
        assert_eq!(snapshot.posts[0].slug, "a");
        assert_eq!(snapshot.pages[0].slug, "about");
        assert_eq!(snapshot.menus.len(), 1);
        assert_eq!(snapshot.menus[0].children[0].href, "/pages/about/team");
        assert_eq!(snapshot.footer_links.len(), 1);
        assert_eq!(snapshot.social_links.len(), 1);
        assert_eq!(snapshot.banners.len(), 1);
        assert_eq!(snapshot.gallery.len(), 1);
        assert_eq!(snapshot.categories.len(), 1);
        assert!(snapshot.failures.is_empty());
        assert_eq!(snapshot.last_error, None);
    }

    #[test]
    fn test_load_all_categorizes_posts() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        let snapshot = loader.load_all();

        assert_eq!(snapshot.buckets.indices(Bucket::Featured), &[0]);
        assert_eq!(snapshot.buckets.indices(Bucket::Research), &[0]);
        assert_eq!(snapshot.buckets.indices(Bucket::Articles), &[1]);
        assert!(snapshot.buckets.indices(Bucket::Notices).is_empty());
    }

    #[test]
    fn test_load_all_within_window_is_one_round_trip() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        let first = loader.load_all();
        let second = loader.load_all();

        assert_eq!(collection_calls(&transport), LOADED_COLLECTIONS.len());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_expired_window_refetches() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, Duration::ZERO);

        loader.load_all();
        loader.load_all();

        assert_eq!(collection_calls(&transport), 2 * LOADED_COLLECTIONS.len());
    }

    #[test]
    fn test_force_refresh_always_refetches() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        loader.load_all();
        let refreshed = loader.force_refresh();

        assert_eq!(collection_calls(&transport), 2 * LOADED_COLLECTIONS.len());
        assert_eq!(refreshed.generation, 1);

        // The refreshed snapshot starts a new window.
        loader.load_all();
        assert_eq!(collection_calls(&transport), 2 * LOADED_COLLECTIONS.len());
    }

    #[test]
    fn test_csrf_fetched_once_across_cycles() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        loader.load_all();
        loader.force_refresh();

        assert_eq!(transport.calls("csrf-token"), 1);
    }

    #[test]
    fn test_failed_collection_does_not_block_siblings() {
        let transport = Arc::new(full_site().with_error("public/pages", "connection refused"));
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        let snapshot = loader.load_all();

        assert_eq!(snapshot.posts.len(), 2);
        assert_eq!(snapshot.menus.len(), 1);
        assert!(snapshot.pages.is_empty());
        assert_eq!(
            snapshot.failure(Collection::Pages),
            Some("Transport error: connection refused")
        );
        assert_eq!(snapshot.failures.len(), 1);
        assert_eq!(snapshot.last_error, None);
    }

    #[test]
    fn test_section_error_scoped_to_failed_collection() {
        let transport = Arc::new(full_site().with_error("public/menu", "connection refused"));
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        let snapshot = loader.load_all();

        assert_eq!(
            snapshot.section_error(Collection::Menu),
            Some("Transport error: connection refused")
        );
        assert_eq!(snapshot.section_error(Collection::Posts), None);
        assert_eq!(snapshot.section_error(Collection::SocialLinks), None);
    }

    #[test]
    fn test_section_error_after_failed_cycle() {
        let transport =
            Arc::new(full_site().with_json("public/menu", json!({"success": true, "menus": {}})));
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        let snapshot = loader.load_all();

        let error = snapshot.last_error.as_deref().unwrap();
        assert_eq!(snapshot.section_error(Collection::Posts), Some(error));
        assert_eq!(snapshot.section_error(Collection::Menu), Some(error));
    }

    #[test]
    fn test_failed_collection_keeps_previous_value() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);
        loader.load_all();

        transport.set_json("public/posts", json!({"success": false, "message": "maintenance"}));
        transport.set_json(
            "public/banners",
            json!({"success": true, "banners": []}),
        );
        let snapshot = loader.force_refresh();

        assert_eq!(snapshot.posts.len(), 2);
        assert_eq!(snapshot.failure(Collection::Posts), Some("maintenance"));
        assert!(snapshot.banners.is_empty());
    }

    #[test]
    fn test_failures_cleared_by_next_successful_cycle() {
        let transport = Arc::new(full_site().with_error("public/pages", "down"));
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);
        assert_eq!(loader.load_all().failures.len(), 1);

        transport.set_json("public/pages", json!({"success": true, "pages": []}));
        let snapshot = loader.force_refresh();

        assert!(snapshot.failures.is_empty());
    }

    #[test]
    fn test_decode_error_fails_cycle_and_keeps_snapshot() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);
        let first = loader.load_all();

        transport.set_json("public/posts", json!({"success": true, "posts": [{"slug": "no-id"}]}));
        transport.set_json("public/pages", json!({"success": true, "pages": []}));
        let snapshot = loader.force_refresh();

        assert_eq!(snapshot.posts, first.posts);
        assert_eq!(snapshot.pages, first.pages);
        let error = snapshot.last_error.as_deref().unwrap();
        assert!(error.contains("invalid item 0 in 'posts'"), "{error}");
    }

    #[test]
    fn test_decode_error_on_first_load_leaves_empty_snapshot() {
        let transport =
            Arc::new(full_site().with_json("public/menu", json!({"success": true, "menus": {}})));
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        let snapshot = loader.load_all();

        assert!(!snapshot.is_loaded());
        assert!(snapshot.posts.is_empty());
        assert!(snapshot.last_error.is_some());

        // A failed cycle does not open a cache window.
        loader.load_all();
        assert_eq!(collection_calls(&transport), 2 * LOADED_COLLECTIONS.len());
    }

    #[test]
    fn test_overtaken_load_is_not_committed() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);

        // A cycle starts and fetches the original posts.
        let stale_generation = loader.generation();
        let stale = loader.fetch_all();

        // Content changes and a refresh overtakes the first cycle.
        transport.set_json(
            "public/posts",
            json!({"success": true, "posts": [{"_id": "z"}]}),
        );
        loader.force_refresh();

        let snapshot = loader.commit(stale_generation, stale);

        assert_eq!(snapshot.posts.len(), 1);
        assert_eq!(snapshot.posts[0].id, Id::new("z"));
        assert_eq!(loader.snapshot().posts[0].id, Id::new("z"));
    }

    #[test]
    fn test_snapshot_lookups() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);
        let snapshot = loader.load_all();

        assert_eq!(snapshot.find_page("/pages/about/").unwrap().name, "About");
        assert_eq!(snapshot.find_page("about").unwrap().id, Id::new("p1"));
        assert!(snapshot.find_page("/").is_none());
        assert!(snapshot.find_page("/pages/missing").is_none());

        assert_eq!(snapshot.footer_links(LinkPosition::Left).len(), 1);
        assert!(snapshot.footer_links(LinkPosition::Right).is_empty());
        assert_eq!(snapshot.social_link("facebook").unwrap().id, Id::new("s1"));
        assert_eq!(snapshot.gallery(Some(MediaKind::Image)).len(), 1);
        assert!(snapshot.gallery(Some(MediaKind::Video)).is_empty());
        assert_eq!(snapshot.gallery(None).len(), 1);

        let featured: Vec<_> = snapshot.bucket(Bucket::Featured).iter().map(|p| p.id.to_string()).collect();
        assert_eq!(featured, vec!["a"]);
    }

    #[test]
    fn test_unpublished_footer_links_hidden() {
        let transport = Arc::new(full_site().with_json(
            "public/all-footer-links",
            json!({"success": true, "footers": [
                {"_id": "f1", "nameEn": "Draft", "position": "LEFT", "status": "DRAFT"},
                {"_id": "f2", "nameEn": "Live", "position": "left", "status": "published"},
                {"_id": "f3", "nameEn": "Nowhere", "position": "TOP", "status": "PUBLISHED"}
            ]}),
        ));
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);
        let snapshot = loader.load_all();

        let left = snapshot.footer_links(LinkPosition::Left);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, Id::new("f2"));
        let placed: usize = LinkPosition::ALL
            .iter()
            .map(|&position| snapshot.footer_links(position).len())
            .sum();
        assert_eq!(placed, 1);
    }

    #[test]
    fn test_latest_notices_keeps_api_order() {
        let transport = Arc::new(full_site().with_json(
            "public/posts",
            json!({"success": true, "posts": [
                {"_id": "n1", "category": {"type": "other"}},
                {"_id": "x", "category": {"type": "news"}},
                {"_id": "n2", "category": {"type": "Other"}},
                {"_id": "n3", "category": {"type": "other"}}
            ]}),
        ));
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);
        let snapshot = loader.load_all();

        let ids: Vec<_> = snapshot.latest_notices(2).iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["n1", "n2"]);
        assert_eq!(snapshot.latest_notices(10).len(), 3);
    }

    #[test]
    fn test_sorted_menus_leaves_snapshot_order() {
        let transport = Arc::new(full_site().with_json(
            "public/menu",
            json!({"success": true, "menus": [
                {"_id": "b", "slug": "b", "order": 2},
                {"_id": "a", "slug": "a", "order": 1}
            ]}),
        ));
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);
        let snapshot = loader.load_all();

        assert_eq!(snapshot.sorted_menus()[0].id, Id::new("a"));
        assert_eq!(snapshot.menus[0].id, Id::new("b"));
    }

    #[test]
    fn test_categories_failure_keeps_previous_lookup() {
        let transport = Arc::new(full_site());
        let loader = loader_with(&transport, DEFAULT_CACHE_TTL);
        loader.load_all();

        transport.set_error("public/categories", "timeout");
        let snapshot = loader.force_refresh();

        // Buckets still resolve categoryId through the previous category list.
        assert_eq!(snapshot.buckets.indices(Bucket::Research), &[0]);
    }
}
