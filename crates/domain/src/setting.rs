use serde::Deserialize;
use std::{fmt, net::IpAddr, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid settings: {0}")]
    Invalid(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// IP address the HTTP listener binds to
    pub ip: IpAddr,

    pub port: u16,
}

/// Development renders debug placeholders for sections that cannot be
/// rendered; production renders nothing for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Development,
    #[default]
    Production,
}

impl RenderMode {
    pub fn is_development(&self) -> bool {
        matches!(self, RenderMode::Development)
    }
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_revalidate_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub mode: RenderMode,

    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Locales served under a `/<locale>` prefix, besides the default one.
    #[serde(default)]
    pub locales: Vec<String>,

    /// Revalidation window for published pages, in seconds
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,

    #[serde(default)]
    pub allow_preview: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            default_locale: default_locale(),
            locales: Vec::new(),
            revalidate_secs: default_revalidate_secs(),
            allow_preview: false,
        }
    }
}

impl SiteSettings {
    pub fn is_known_locale(&self, locale: &str) -> bool {
        locale == self.default_locale || self.locales.iter().any(|l| l == locale)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSourceKind {
    #[default]
    Contentful,
    Files,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentSettings {
    #[serde(default)]
    pub source: ContentSourceKind,

    /// Fixture directory for the `files` source, relative to the site dir
    pub dir: Option<PathBuf>,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommerceSettings {
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl Default for CommerceSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub content: ContentSettings,
    #[serde(default)]
    pub commerce: CommerceSettings,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        if settings.site.revalidate_secs == 0 {
            return Err(SettingsError::Invalid(
                "site.revalidate_secs must be greater than zero".into(),
            ));
        }
        if settings.content.source == ContentSourceKind::Files && settings.content.dir.is_none() {
            return Err(SettingsError::Invalid(
                "content.dir is required when content.source = \"files\"".into(),
            ));
        }
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CMS credentials (environment)
// ─────────────────────────────────────────────────────────────────────────────

pub const ENV_SPACE_ID: &str = "CONTENTFUL_SPACE_ID";
pub const ENV_ENVIRONMENT: &str = "CONTENTFUL_ENVIRONMENT";
pub const ENV_API_BASE_URL: &str = "CONTENTFUL_API_BASE_URL";
pub const ENV_ACCESS_TOKEN: &str = "CONTENTFUL_ACCESS_TOKEN";
pub const ENV_PREVIEW_ACCESS_TOKEN: &str = "CONTENTFUL_PREVIEW_ACCESS_TOKEN";

#[derive(Clone)]
pub struct CmsSettings {
    pub space_id: String,
    pub environment: String,
    pub api_base_url: String,
    pub access_token: String,
    pub preview_access_token: String,
}

impl CmsSettings {
    /// Read credentials from the process environment. Every variable is
    /// required; the first missing one is reported.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(SettingsError::MissingEnv(key))
        };

        Ok(Self {
            space_id: require(ENV_SPACE_ID)?,
            environment: require(ENV_ENVIRONMENT)?,
            api_base_url: require(ENV_API_BASE_URL)?,
            access_token: require(ENV_ACCESS_TOKEN)?,
            preview_access_token: require(ENV_PREVIEW_ACCESS_TOKEN)?,
        })
    }

    /// GraphQL endpoint for the configured space and environment.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/content/v1/spaces/{}/environments/{}",
            self.api_base_url.trim_end_matches('/'),
            self.space_id,
            self.environment
        )
    }

    pub fn token(&self, preview: bool) -> &str {
        if preview {
            &self.preview_access_token
        } else {
            &self.access_token
        }
    }
}

impl fmt::Debug for CmsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmsSettings")
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .field("api_base_url", &self.api_base_url)
            .field("access_token", &"<redacted>")
            .field("preview_access_token", &"<redacted>")
            .finish()
    }
}
