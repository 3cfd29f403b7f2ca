// crates/adapt/src/links.rs

use domain::content::SiteConfig;

/// Builds site-relative URLs for entries.
///
/// Pages for the default locale live at the root; other locales get a
/// `/<locale>` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    prefix: String,
    news_slug: String,
    products_slug: String,
}

impl Links {
    pub fn new(config: &SiteConfig, locale: &str, default_locale: &str) -> Self {
        let prefix = if locale.is_empty() || locale == default_locale {
            String::new()
        } else {
            format!("/{locale}")
        };

        Self {
            prefix,
            news_slug: config.news_slug().trim_matches('/').to_string(),
            products_slug: config.products_slug().trim_matches('/').to_string(),
        }
    }

    pub fn article(&self, slug: &str) -> String {
        format!("{}/{}/{}", self.prefix, self.news_slug, slug.trim_matches('/'))
    }

    pub fn product(&self, slug: &str) -> String {
        format!("{}/{}/{}", self.prefix, self.products_slug, slug.trim_matches('/'))
    }
}

impl Default for Links {
    fn default() -> Self {
        Links::new(&SiteConfig::default(), "", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_has_no_prefix() {
        let links = Links::new(&SiteConfig::default(), "en-US", "en-US");
        assert_eq!(links.article("launch"), "/news/launch");
        assert_eq!(links.product("/kettle/"), "/products/kettle");
    }

    #[test]
    fn other_locales_are_prefixed_and_use_configured_slugs() {
        let config = SiteConfig {
            news_slug: Some("/blog/".into()),
            products_slug: Some("shop".into()),
            ..Default::default()
        };
        let links = Links::new(&config, "de-DE", "en-US");
        assert_eq!(links.article("launch"), "/de-DE/blog/launch");
        assert_eq!(links.product("kettle"), "/de-DE/shop/kettle");
    }
}
