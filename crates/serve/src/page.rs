// crates/serve/src/page.rs

//! Page fetch + assembly.
//!
//! A request fetches through its [`RequestCache`], so building the metadata
//! and rendering the body cost one CMS round trip per [`PageKey`].

use crate::cache::RequestCache;
use crate::source::{ContentSource, PageKey};
use crate::Error;
use adapt::{resolve_section, Links, SectionView};
use domain::content::{non_blank, Page, Section, SiteConfig};
use domain::setting::{RenderMode, SiteSettings};
use serde::Serialize;
use tracing::{debug, warn};

pub const NOT_FOUND_TITLE: &str = "Page not found";

/// Everything the layout template needs for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub path: String,
    pub locale: String,
    pub site_name: Option<String>,
    pub top: Vec<SectionView>,
    pub bottom: Vec<SectionView>,
}

impl PageView {
    pub fn sections(&self) -> impl Iterator<Item = &SectionView> {
        self.top.iter().chain(self.bottom.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

impl Metadata {
    pub fn not_found() -> Self {
        Self {
            title: NOT_FOUND_TITLE.to_string(),
            description: NOT_FOUND_TITLE.to_string(),
        }
    }

    pub fn of(page: &Page) -> Self {
        Self {
            title: non_blank(page.seo_title.as_deref())
                .unwrap_or(page.path.as_str())
                .to_string(),
            description: non_blank(page.seo_description.as_deref())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Resolve both content areas in order. Top area first, then bottom.
pub fn assemble_page(
    page: &Page,
    config: &SiteConfig,
    links: &Links,
    locale: &str,
    mode: RenderMode,
) -> PageView {
    let resolve = |s: &Section| resolve_section(s, links, mode);

    PageView {
        path: page.path.clone(),
        locale: locale.to_string(),
        site_name: non_blank(config.site_name.as_deref()).map(str::to_string),
        top: page.top_sections().map(resolve).collect(),
        bottom: page.bottom_sections().map(resolve).collect(),
    }
}

/// SEO metadata for a page. Never fails: a missing page or a failed fetch
/// both yield the not-found metadata.
pub async fn page_metadata(
    source: &dyn ContentSource,
    cache: &RequestCache,
    key: &PageKey,
) -> Metadata {
    match cache.page(source, key).await {
        Ok(Some(page)) => Metadata::of(&page),
        Ok(None) => Metadata::not_found(),
        Err(e) => {
            warn!(path = %key.path, "metadata fetch failed: {}", e);
            Metadata::not_found()
        }
    }
}

/// Fetch and assemble the page at `key`. `Ok(None)` when the CMS has no page
/// at that path; fetch errors propagate.
#[tracing::instrument(skip_all, fields(path = %key.path, locale = %key.locale, preview = key.preview))]
pub async fn load_page(
    source: &dyn ContentSource,
    cache: &RequestCache,
    key: &PageKey,
    site: &SiteSettings,
) -> Result<Option<PageView>, Error> {
    let Some(page) = cache.page(source, key).await? else {
        debug!("page not found");
        return Ok(None);
    };

    let config = cache.site_config(source, &key.locale, key.preview).await?;
    Ok(Some(build_view(&page, &config, key, site)))
}

/// Assemble an already fetched (possibly modified) page for `key`.
pub fn build_view(page: &Page, config: &SiteConfig, key: &PageKey, site: &SiteSettings) -> PageView {
    let links = Links::new(config, &key.locale, &site.default_locale);
    assemble_page(page, config, &links, &key.locale, site.mode)
}
