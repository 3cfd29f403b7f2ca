use crate::Error;
use domain::setting::SiteSettings;
use serve::{CachedSource, ContentSource, HbsEngine};
use std::sync::Arc;
use std::time::Duration;

/// Shared, cheaply cloned request state.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteSettings>,
    pub content: Arc<CachedSource>,
    pub engine: Arc<HbsEngine>,
}

impl AppState {
    #[tracing::instrument(skip_all)]
    pub fn new(site: SiteSettings, source: Arc<dyn ContentSource>) -> Result<Self, Error> {
        let ttl = Duration::from_secs(site.revalidate_secs);
        let engine = HbsEngine::with_builtin_templates()?;

        Ok(Self {
            site: Arc::new(site),
            content: Arc::new(CachedSource::new(source, ttl)),
            engine: Arc::new(engine),
        })
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.content.as_ref()
    }

    /// Split a request path into `(locale, page path)`. A leading segment
    /// naming a configured locale selects it; anything else is the default
    /// locale.
    pub fn split_locale<'a>(&'a self, path: &'a str) -> (&'a str, &'a str) {
        let trimmed = path.trim_start_matches('/');
        let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

        if !first.is_empty() && self.site.is_known_locale(first) {
            return (first, rest);
        }
        (self.site.default_locale.as_str(), path)
    }

    /// Home link for a locale, honoring the default-locale prefix rule.
    pub fn home(&self, locale: &str) -> String {
        if locale == self.site.default_locale {
            "/".to_string()
        } else {
            format!("/{locale}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serve::FileSource;

    fn state() -> AppState {
        let site = SiteSettings {
            locales: vec!["de-DE".into()],
            ..Default::default()
        };
        AppState::new(site, Arc::new(FileSource::new("/nonexistent"))).expect("state")
    }

    #[test]
    fn locale_prefix_is_split_off() {
        let state = state();
        assert_eq!(state.split_locale("/de-DE/about"), ("de-DE", "about"));
        assert_eq!(state.split_locale("/de-DE"), ("de-DE", ""));
        assert_eq!(state.split_locale("/about/team"), ("en-US", "/about/team"));
        assert_eq!(state.split_locale("/"), ("en-US", "/"));
        assert_eq!(state.split_locale("/fr-FR/about"), ("en-US", "/fr-FR/about"));
    }

    #[test]
    fn home_links() {
        let state = state();
        assert_eq!(state.home("en-US"), "/");
        assert_eq!(state.home("de-DE"), "/de-DE");
    }
}
