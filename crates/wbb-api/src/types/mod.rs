//! Typed records decoded from the content API.
//!
//! Each record is decoded through a private raw struct that mirrors the
//! loose wire shape. Conversion into the public type applies every default
//! (missing arrays become empty, missing translations become empty strings,
//! slugs are normalized) so consumers never see optional plumbing.

mod category;
mod id;
mod link;
mod media;
mod menu;
mod page;
mod post;
mod time;

pub use category::{Category, CategoryRef};
pub use id::Id;
pub use link::{FooterLink, Link, LinkPosition, LinkStatus, SocialLink};
pub use media::{Banner, GalleryItem, MediaKind};
pub use menu::MenuItem;
pub use page::{Page, TemplateAsset, TemplateContent};
pub use post::{PdfAttachment, Post, PostImage};

use wbb_lang::Localized;

/// Pick the localized object form, or build one from `<field>En`/`<field>Bn`.
fn localized_or_split(
    object: Option<Localized<String>>,
    en: Option<String>,
    bn: Option<String>,
) -> Localized<String> {
    object.unwrap_or_else(|| Localized::new(en.unwrap_or_default(), bn.unwrap_or_default()))
}
