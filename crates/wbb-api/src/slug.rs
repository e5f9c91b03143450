/// Strip leading and trailing slashes so `"/about/"` and `"about"` match.
pub fn normalize_slug(slug: &str) -> &str {
    slug.trim_matches('/')
}
