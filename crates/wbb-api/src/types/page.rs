use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use wbb_lang::{Language, Localized};

use super::id::{Id, resolve_id};
use crate::error::TemplateError;
use crate::slug::normalize_slug;

/// Matches the first `<title>` element so it does not leak into the body.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title>.*?</title>").unwrap());

/// A CMS page built with the page designer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPage")]
pub struct Page {
    pub id: Id,
    /// Normalized slug (no leading/trailing slashes).
    pub slug: String,
    /// Display name.
    pub name: String,
    pub layout: Option<String>,
    /// Raw template documents per language (JSON text, possibly empty).
    pub template: Localized<String>,
}

impl Page {
    /// Whether any language carries template content.
    pub fn has_template(&self) -> bool {
        !self.template.is_blank()
    }

    /// Parse the template for `lang`, falling back to English.
    pub fn template_content(&self, lang: Language) -> Result<TemplateContent, TemplateError> {
        let source = self.template.get(lang);
        if source.trim().is_empty() {
            return Err(TemplateError::Empty);
        }
        TemplateContent::parse(source)
    }
}

/// A parsed page template document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateContent {
    /// Markup with any `<title>` element removed.
    pub html: String,
    pub css: String,
    pub assets: Vec<TemplateAsset>,
}

/// An asset referenced by a template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateAsset {
    /// Asset type, e.g. `image`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub src: String,
}

#[derive(Deserialize)]
struct RawTemplateContent {
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    css: Option<String>,
    #[serde(default)]
    assets: Option<Vec<TemplateAsset>>,
}

impl TemplateContent {
    /// Parse a template document (`{html, css, assets}` encoded as JSON text).
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let raw: RawTemplateContent = serde_json::from_str(source)?;
        let html = raw.html.unwrap_or_default();
        Ok(Self {
            html: TITLE_RE.replace(&html, "").into_owned(),
            css: raw.css.unwrap_or_default(),
            assets: raw.assets.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
struct RawPage {
    #[serde(rename = "_id", default)]
    underscore: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    layout: Option<String>,
    #[serde(default)]
    template: Option<RawTemplate>,
}

#[derive(Deserialize)]
struct RawTemplate {
    #[serde(default)]
    en: Option<RawTemplateSide>,
    #[serde(default)]
    bn: Option<RawTemplateSide>,
}

#[derive(Deserialize)]
struct RawTemplateSide {
    #[serde(default)]
    content: Option<String>,
}

fn side_content(side: Option<RawTemplateSide>) -> String {
    side.and_then(|s| s.content).unwrap_or_default()
}

impl TryFrom<RawPage> for Page {
    type Error = String;

    fn try_from(raw: RawPage) -> Result<Self, Self::Error> {
        let template = raw.template.map_or_else(Localized::default, |t| {
            Localized::new(side_content(t.en), side_content(t.bn))
        });
        Ok(Self {
            id: resolve_id(raw.underscore, raw.id, "page")?,
            slug: normalize_slug(raw.slug.as_deref().unwrap_or_default()).to_owned(),
            name: raw.name.unwrap_or_default(),
            layout: raw.layout.filter(|l| !l.is_empty()),
            template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page_with_template(en: &str, bn: &str) -> Page {
        serde_json::from_value(json!({
            "_id": "p1",
            "slug": "/about/",
            "name": "About",
            "template": {"en": {"content": en}, "bn": {"content": bn}}
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_page() {
        let page = page_with_template("{}", "");
        assert_eq!(page.id, Id::new("p1"));
        assert_eq!(page.slug, "about");
        assert_eq!(page.name, "About");
        assert_eq!(page.layout, None);
        assert!(page.has_template());
    }

    #[test]
    fn test_page_without_template() {
        let page: Page = serde_json::from_value(json!({"_id": "p1", "slug": "x"})).unwrap();
        assert!(!page.has_template());
        assert!(matches!(
            page.template_content(Language::En),
            Err(TemplateError::Empty)
        ));
    }

    #[test]
    fn test_parse_template_strips_title() {
        let content = TemplateContent::parse(
            r#"{"html": "<TITLE>About us</TITLE><h1>About</h1>", "css": "h1{color:red}", "assets": [{"type": "image", "src": "/a.png"}]}"#,
        )
        .unwrap();

        assert_eq!(content.html, "<h1>About</h1>");
        assert_eq!(content.css, "h1{color:red}");
        assert_eq!(
            content.assets,
            vec![TemplateAsset {
                kind: "image".to_owned(),
                src: "/a.png".to_owned(),
            }]
        );
    }

    #[test]
    fn test_parse_template_defaults() {
        let content = TemplateContent::parse("{}").unwrap();
        assert_eq!(content, TemplateContent::default());
    }

    #[test]
    fn test_invalid_template_json() {
        let page = page_with_template("<h1>not json</h1>", "");
        assert!(matches!(
            page.template_content(Language::En),
            Err(TemplateError::Json(_))
        ));
    }

    #[test]
    fn test_bengali_template_falls_back_to_english() {
        let page = page_with_template(r#"{"html": "<p>en</p>"}"#, "");
        let content = page.template_content(Language::Bn).unwrap();
        assert_eq!(content.html, "<p>en</p>");
    }

    #[test]
    fn test_bengali_template_used_when_present() {
        let page = page_with_template(r#"{"html": "<p>en</p>"}"#, r#"{"html": "<p>bn</p>"}"#);
        let content = page.template_content(Language::Bn).unwrap();
        assert_eq!(content.html, "<p>bn</p>");
    }
}
