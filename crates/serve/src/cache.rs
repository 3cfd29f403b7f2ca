// crates/serve/src/cache.rs

//! Two caches sit between the page pipeline and the CMS:
//!
//! - [`CachedSource`]: shared across requests, keeps published pages for the
//!   revalidation window. Preview fetches always go to the inner source.
//! - [`RequestCache`]: lives for one request so metadata and body rendering
//!   share a single fetch per key.

use crate::source::{normalize_path, ContentSource, PageKey};
use crate::Error;
use async_trait::async_trait;
use domain::content::{Page, SiteConfig};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

struct Stamped<T> {
    at: Instant,
    value: T,
}

pub struct CachedSource {
    inner: Arc<dyn ContentSource>,
    ttl: Duration,
    pages: RwLock<HashMap<PageKey, Stamped<Option<Page>>>>,
    configs: RwLock<HashMap<String, Stamped<SiteConfig>>>,
}

impl CachedSource {
    pub fn new(inner: Arc<dyn ContentSource>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            pages: RwLock::new(HashMap::new()),
            configs: RwLock::new(HashMap::new()),
        }
    }

    fn fresh<T: Clone>(&self, stamped: Option<&Stamped<T>>) -> Option<T> {
        stamped
            .filter(|s| s.at.elapsed() < self.ttl)
            .map(|s| s.value.clone())
    }

    /// Insert `value`, sweeping expired entries first so misses on
    /// arbitrary paths cannot grow the map past one window's worth.
    fn store<K: Eq + Hash, T>(&self, map: &RwLock<HashMap<K, Stamped<T>>>, key: K, value: T) {
        let mut map = map.write();
        map.retain(|_, s| s.at.elapsed() < self.ttl);
        map.insert(
            key,
            Stamped {
                at: Instant::now(),
                value,
            },
        );
    }

    /// Drop every cached entry for `path`, in all locales. Returns how many
    /// entries were evicted. Site config is dropped too, since a save event
    /// does not say which entry changed.
    pub fn invalidate_path(&self, path: &str) -> usize {
        let path = normalize_path(path);
        let mut pages = self.pages.write();
        let before = pages.len();
        pages.retain(|key, _| key.path != path);
        let evicted = before - pages.len();
        drop(pages);

        self.configs.write().clear();
        debug!(%path, evicted, "revalidated path");
        evicted
    }
}

#[async_trait]
impl ContentSource for CachedSource {
    async fn page(&self, key: &PageKey) -> Result<Option<Page>, Error> {
        if key.preview {
            return self.inner.page(key).await;
        }

        let hit = self.fresh(self.pages.read().get(key));
        if let Some(page) = hit {
            debug!(path = %key.path, locale = %key.locale, "page cache hit");
            return Ok(page);
        }

        let page = self.inner.page(key).await?;
        self.store(&self.pages, key.clone(), page.clone());
        Ok(page)
    }

    async fn site_config(&self, locale: &str, preview: bool) -> Result<SiteConfig, Error> {
        if preview {
            return self.inner.site_config(locale, preview).await;
        }

        let hit = self.fresh(self.configs.read().get(locale));
        if let Some(config) = hit {
            return Ok(config);
        }

        let config = self.inner.site_config(locale, preview).await?;
        self.store(&self.configs, locale.to_string(), config.clone());
        Ok(config)
    }
}

/// Per-request memoization keyed by [`PageKey`].
#[derive(Default)]
pub struct RequestCache {
    pages: Mutex<HashMap<PageKey, Option<Arc<Page>>>>,
    configs: Mutex<HashMap<(String, bool), SiteConfig>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn page(
        &self,
        source: &dyn ContentSource,
        key: &PageKey,
    ) -> Result<Option<Arc<Page>>, Error> {
        let hit = self.pages.lock().get(key).cloned();
        if let Some(page) = hit {
            return Ok(page);
        }

        let page = source.page(key).await?.map(Arc::new);
        self.pages.lock().insert(key.clone(), page.clone());
        Ok(page)
    }

    pub async fn site_config(
        &self,
        source: &dyn ContentSource,
        locale: &str,
        preview: bool,
    ) -> Result<SiteConfig, Error> {
        let cache_key = (locale.to_string(), preview);
        let hit = self.configs.lock().get(&cache_key).cloned();
        if let Some(config) = hit {
            return Ok(config);
        }

        let config = source.site_config(locale, preview).await?;
        self.configs.lock().insert(cache_key, config.clone());
        Ok(config)
    }
}
