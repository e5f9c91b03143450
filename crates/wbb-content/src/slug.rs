//! Route and slug normalization.

pub use wbb_api::normalize_slug;

/// Prefix under which CMS pages are routed.
const PAGES_PREFIX: &str = "pages/";

/// Convert a site route (`/pages/about/`, `/about`, `about`) to a page slug.
pub fn route_to_slug(route: &str) -> &str {
    let route = route.trim_start_matches('/');
    let route = route.strip_prefix(PAGES_PREFIX).unwrap_or(route);
    normalize_slug(route)
}
