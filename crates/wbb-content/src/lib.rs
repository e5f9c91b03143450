//! Site content for WBB.
//!
//! This crate provides:
//! - [`ContentLoader`]: parallel fetch of every collection with a cache window
//! - [`ContentSnapshot`]: committed content plus derived post buckets and menu tree
//! - Page and post views with related posts
//! - Route and slug helpers
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use wbb_api::ApiClient;
//! use wbb_content::{Bucket, ContentLoader, ContentLoaderConfig};
//! use wbb_lang::Language;
//!
//! let client = ApiClient::new("https://cms.example.org/api", Duration::from_secs(30));
//! let loader = ContentLoader::new(client, ContentLoaderConfig::default());
//!
//! let snapshot = loader.load_all();
//! for post in snapshot.bucket(Bucket::Research) {
//!     println!("{}", post.title.get(Language::En));
//! }
//!
//! let about = loader.page_view("/pages/about", Language::Bn);
//! ```

mod categorize;
mod loader;
mod menu;
mod slug;
mod tracker;
mod views;

pub use categorize::{Bucket, Categorization, categorize, category_kind};
pub use loader::{
    CollectionFailure, ContentLoader, ContentLoaderConfig, ContentSnapshot, DEFAULT_CACHE_TTL,
    LOADED_COLLECTIONS,
};
pub use menu::{MenuNode, build_menu_tree, sort_by_order};
pub use slug::{normalize_slug, route_to_slug};
pub use tracker::{Detail, RequestTicket, RequestTracker};
pub use views::{MAX_RELATED_POSTS, PageView, PostView, related_posts, youtube_id};
