// crates/serve/src/source.rs

//! Storage-agnostic access to CMS content.
//!
//! The page pipeline only sees [`ContentSource`]; the GraphQL client, the
//! file-backed fixture source and the revalidating cache all implement it and
//! are chosen by the edge crate at startup.

use crate::Error;
use async_trait::async_trait;
use domain::content::{Page, SiteConfig};

/// Identity of one page fetch: path + locale + preview flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub path: String,
    pub locale: String,
    pub preview: bool,
}

impl PageKey {
    pub fn new(path: &str, locale: &str, preview: bool) -> Self {
        Self {
            path: normalize_path(path),
            locale: locale.to_string(),
            preview,
        }
    }
}

/// Leading slash, no trailing slash (except for the root).
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{trimmed}")
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// `Ok(None)` when no page exists at the key's path.
    async fn page(&self, key: &PageKey) -> Result<Option<Page>, Error>;

    async fn site_config(&self, locale: &str, preview: bool) -> Result<SiteConfig, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_keys_normalize_slashes() {
        assert_eq!(PageKey::new("", "en-US", false).path, "/");
        assert_eq!(PageKey::new("/", "en-US", false).path, "/");
        assert_eq!(PageKey::new("about/", "en-US", false).path, "/about");
        assert_eq!(PageKey::new("/products/kettle", "en-US", true).path, "/products/kettle");
        assert_eq!(
            PageKey::new("/about", "en-US", false),
            PageKey::new("about/", "en-US", false)
        );
    }
}
