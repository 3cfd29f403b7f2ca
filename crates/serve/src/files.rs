// crates/serve/src/files.rs

//! File-backed content source for local development and tests.
//!
//! Layout under the root directory:
//!
//! ```text
//! config.json                      SiteConfig
//! <locale>/index.json              page at "/"
//! <locale>/<path>.json             page at "/<path>"
//! <locale>/<path>.preview.json     draft used when preview = true (optional)
//! ```
//!
//! Page files use the same JSON shape as a GraphQL `pageCollection` item.

use crate::source::{ContentSource, PageKey};
use crate::Error;
use async_trait::async_trait;
use domain::content::{Page, SiteConfig};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn page_stem(&self, key: &PageKey) -> Result<PathBuf, Error> {
        let relative = key.path.trim_matches('/');
        let relative = if relative.is_empty() { "index" } else { relative };

        let safe = Path::new(relative)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        let locale_ok = !key.locale.is_empty()
            && Path::new(&key.locale)
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe || !locale_ok {
            return Err(Error::InvalidPath(key.path.clone()));
        }

        Ok(self.root.join(&key.locale).join(relative))
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>, Error> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[async_trait]
impl ContentSource for FileSource {
    async fn page(&self, key: &PageKey) -> Result<Option<Page>, Error> {
        let stem = self.page_stem(key)?;

        let mut text = None;
        if key.preview {
            text = read_optional(&with_suffix(&stem, ".preview.json")).await?;
        }
        if text.is_none() {
            text = read_optional(&with_suffix(&stem, ".json")).await?;
        }

        let Some(text) = text else {
            debug!(path = %key.path, locale = %key.locale, "no page file");
            return Ok(None);
        };

        let mut page: Page = serde_json::from_str(&text)?;
        if page.path.is_empty() {
            page.path = key.path.clone();
        }
        Ok(Some(page))
    }

    async fn site_config(&self, _locale: &str, _preview: bool) -> Result<SiteConfig, Error> {
        match read_optional(&self.root.join("config.json")).await? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(SiteConfig::default()),
        }
    }
}
