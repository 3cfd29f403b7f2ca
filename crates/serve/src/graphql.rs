// crates/serve/src/graphql.rs

//! CMS GraphQL client.

use crate::source::{ContentSource, PageKey};
use crate::Error;
use async_trait::async_trait;
use domain::content::{Collection, Page, SiteConfig};
use domain::setting::CmsSettings;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value as Json};
use std::time::Duration;
use tracing::{debug, warn};

pub const SITE_CONFIG_QUERY: &str = r#"
query SiteConfig($locale: String, $preview: Boolean) {
  configCollection(limit: 1, locale: $locale, preview: $preview) {
    items { siteName newsSlug productsSlug }
  }
}
"#;

pub const PAGE_QUERY: &str = r#"
fragment AssetFields on Asset { url title description width height }
fragment ArticleFields on Article {
  sys { id } title slug excerpt featuredImageAlt publishedDate
  featuredImage { ...AssetFields }
}
fragment ProductFields on Product {
  sys { id } name slug description price
  imagesCollection(limit: 3) { items { ...AssetFields } }
}
fragment DocumentFields on Document {
  sys { id } title description
  file { ...AssetFields }
  thumbnail { ...AssetFields }
}
fragment ContentItemFields on ContentItem {
  sys { id } title body imageAlt ctaText ctaUrl
  image { ...AssetFields }
}
fragment EntryFields on Entry {
  __typename
  sys { id }
  ...ArticleFields
  ...ProductFields
  ...DocumentFields
  ...ContentItemFields
}
fragment PageSectionItemFields on PageSectionItem {
  sys { id } internalName userInterface
  content { ...EntryFields }
}
fragment PageSectionListFields on PageSectionList {
  sys { id } internalName userInterface
  list {
    sys { id } title
    itemsCollection(limit: 10) { items { ...EntryFields } }
  }
}
query PageByPath($path: String!, $locale: String, $preview: Boolean) {
  pageCollection(where: { path: $path }, limit: 1, locale: $locale, preview: $preview) {
    items {
      sys { id } path seoTitle seoDescription
      topContentAreaCollection(limit: 20) {
        items { __typename ...PageSectionItemFields ...PageSectionListFields }
      }
      bottomContentAreaCollection(limit: 20) {
        items { __typename ...PageSectionItemFields ...PageSectionListFields }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageData {
    page_collection: Option<Collection<Page>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigData {
    config_collection: Option<Collection<SiteConfig>>,
}

/// Partial data with errors (e.g. unresolvable links) is accepted and the
/// errors are logged; errors without data fail the request.
fn into_data<T>(response: GraphQlResponse<T>) -> Result<T, Error> {
    let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();

    match response.data {
        Some(data) => {
            if !messages.is_empty() {
                warn!("CMS returned partial data: {}", messages.join("; "));
            }
            Ok(data)
        }
        None if messages.is_empty() => {
            Err(Error::GraphQl(vec!["response carried no data".to_string()]))
        }
        None => Err(Error::GraphQl(messages)),
    }
}

pub struct GraphQlClient {
    client: reqwest::Client,
    cms: CmsSettings,
}

impl GraphQlClient {
    pub fn new(cms: CmsSettings) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, cms })
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Json,
        preview: bool,
    ) -> Result<T, Error> {
        let response = self
            .client
            .post(self.cms.endpoint())
            .bearer_auth(self.cms.token(preview))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        into_data(response.json::<GraphQlResponse<T>>().await?)
    }
}

#[async_trait]
impl ContentSource for GraphQlClient {
    #[tracing::instrument(skip_all, fields(path = %key.path, locale = %key.locale, preview = key.preview))]
    async fn page(&self, key: &PageKey) -> Result<Option<Page>, Error> {
        let variables = json!({
            "path": key.path,
            "locale": key.locale,
            "preview": key.preview,
        });

        let data: PageData = self.query(PAGE_QUERY, variables, key.preview).await?;
        let page = data
            .page_collection
            .and_then(|c| c.items.into_iter().flatten().next());

        debug!(found = page.is_some(), "page query finished");
        Ok(page)
    }

    #[tracing::instrument(skip_all)]
    async fn site_config(&self, locale: &str, preview: bool) -> Result<SiteConfig, Error> {
        let variables = json!({ "locale": locale, "preview": preview });
        let data: ConfigData = self.query(SITE_CONFIG_QUERY, variables, preview).await?;

        Ok(data
            .config_collection
            .and_then(|c| c.items.into_iter().flatten().next())
            .unwrap_or_default())
    }
}
