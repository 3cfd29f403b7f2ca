// crates/domain/src/content.rs

//! CMS page graph, shaped like the GraphQL responses.
//!
//! Unions are tagged by `__typename`. A typename this crate does not know
//! lands in an `Unknown` variant that keeps the raw JSON, so callers can log
//! it or show it in a development placeholder instead of failing the page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// `<field>Collection { items }` wrapper. Unresolvable links come back as
/// `null` items; they are kept here and skipped by [`Collection::iter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Option<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Collection<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().flatten()
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Some).collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Content entries
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub sys: Sys,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<Asset>,
    pub featured_image_alt: Option<String>,
    pub published_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(default)]
    pub sys: Sys,
    pub title: Option<String>,
    pub body: Option<String>,
    pub image: Option<Asset>,
    pub image_alt: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub sys: Sys,
    pub title: Option<String>,
    pub description: Option<String>,
    pub file: Option<Asset>,
    pub thumbnail: Option<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub sys: Sys,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub images_collection: Option<Collection<Asset>>,
}

impl Product {
    /// First non-null product image, if any.
    pub fn primary_image(&self) -> Option<&Asset> {
        self.images_collection.as_ref().and_then(|c| c.iter().next())
    }
}

/// Polymorphic entry referenced by a section or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum ContentEntry {
    Article(Article),
    ContentItem(ContentItem),
    Document(Document),
    Product(Product),
    #[serde(untagged)]
    Unknown(Json),
}

impl ContentEntry {
    pub fn typename(&self) -> &str {
        match self {
            ContentEntry::Article(_) => "Article",
            ContentEntry::ContentItem(_) => "ContentItem",
            ContentEntry::Document(_) => "Document",
            ContentEntry::Product(_) => "Product",
            ContentEntry::Unknown(raw) => raw
                .get("__typename")
                .and_then(Json::as_str)
                .unwrap_or("<missing __typename>"),
        }
    }

    pub fn id(&self) -> Option<&str> {
        let id = match self {
            ContentEntry::Article(a) => a.sys.id.as_str(),
            ContentEntry::ContentItem(c) => c.sys.id.as_str(),
            ContentEntry::Document(d) => d.sys.id.as_str(),
            ContentEntry::Product(p) => p.sys.id.as_str(),
            ContentEntry::Unknown(raw) => raw
                .pointer("/sys/id")
                .and_then(Json::as_str)
                .unwrap_or_default(),
        };
        (!id.is_empty()).then_some(id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionItem {
    #[serde(default)]
    pub sys: Sys,
    pub internal_name: Option<String>,
    pub user_interface: Option<String>,
    pub content: Option<ContentEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryList {
    #[serde(default)]
    pub sys: Sys,
    pub title: Option<String>,
    pub items_collection: Option<Collection<ContentEntry>>,
}

impl EntryList {
    pub fn entries(&self) -> impl Iterator<Item = &ContentEntry> {
        self.items_collection.iter().flat_map(Collection::iter)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionList {
    #[serde(default)]
    pub sys: Sys,
    pub internal_name: Option<String>,
    pub user_interface: Option<String>,
    pub list: Option<EntryList>,
}

/// A slot on a page: one entry, or a list of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Section {
    PageSectionItem(SectionItem),
    PageSectionList(SectionList),
    #[serde(untagged)]
    Unknown(Json),
}

impl Section {
    pub fn typename(&self) -> &str {
        match self {
            Section::PageSectionItem(_) => "PageSectionItem",
            Section::PageSectionList(_) => "PageSectionList",
            Section::Unknown(raw) => raw
                .get("__typename")
                .and_then(Json::as_str)
                .unwrap_or("<missing __typename>"),
        }
    }

    pub fn id(&self) -> Option<&str> {
        let id = match self {
            Section::PageSectionItem(s) => s.sys.id.as_str(),
            Section::PageSectionList(s) => s.sys.id.as_str(),
            Section::Unknown(raw) => raw
                .pointer("/sys/id")
                .and_then(Json::as_str)
                .unwrap_or_default(),
        };
        (!id.is_empty()).then_some(id)
    }

    /// Raw editor tag, empty when the field is unset.
    pub fn user_interface(&self) -> &str {
        match self {
            Section::PageSectionItem(s) => s.user_interface.as_deref().unwrap_or_default(),
            Section::PageSectionList(s) => s.user_interface.as_deref().unwrap_or_default(),
            Section::Unknown(raw) => raw
                .get("userInterface")
                .and_then(Json::as_str)
                .unwrap_or_default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page + site config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub sys: Sys,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub top_content_area_collection: Option<Collection<Section>>,
    pub bottom_content_area_collection: Option<Collection<Section>>,
}

impl Page {
    pub fn top_sections(&self) -> impl Iterator<Item = &Section> {
        self.top_content_area_collection
            .iter()
            .flat_map(Collection::iter)
    }

    pub fn bottom_sections(&self) -> impl Iterator<Item = &Section> {
        self.bottom_content_area_collection
            .iter()
            .flat_map(Collection::iter)
    }
}

pub const DEFAULT_NEWS_SLUG: &str = "news";
pub const DEFAULT_PRODUCTS_SLUG: &str = "products";

/// Site-wide singleton (`Config` content type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_name: Option<String>,
    pub news_slug: Option<String>,
    pub products_slug: Option<String>,
}

impl SiteConfig {
    pub fn news_slug(&self) -> &str {
        non_blank(self.news_slug.as_deref()).unwrap_or(DEFAULT_NEWS_SLUG)
    }

    pub fn products_slug(&self) -> &str {
        non_blank(self.products_slug.as_deref()).unwrap_or(DEFAULT_PRODUCTS_SLUG)
    }
}

/// Trimmed value, or `None` when absent or whitespace only.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_page() -> Json {
        json!({
            "sys": { "id": "page-home" },
            "path": "/",
            "seoTitle": "Home",
            "seoDescription": null,
            "topContentAreaCollection": { "items": [
                {
                    "__typename": "PageSectionItem",
                    "sys": { "id": "s1" },
                    "userInterface": "Hero",
                    "content": {
                        "__typename": "ContentItem",
                        "sys": { "id": "ci1" },
                        "title": "Welcome",
                        "ctaText": "Shop",
                        "ctaUrl": "/products"
                    }
                },
                null,
                {
                    "__typename": "PageSectionList",
                    "sys": { "id": "s2" },
                    "userInterface": "Product Grid",
                    "list": {
                        "title": "Best sellers",
                        "itemsCollection": { "items": [
                            { "__typename": "Product", "sys": { "id": "p1" }, "name": "Kettle", "price": 39.5 },
                            { "__typename": "Testimonial", "sys": { "id": "t1" }, "quote": "Great" }
                        ]}
                    }
                }
            ]},
            "bottomContentAreaCollection": null
        })
    }

    #[test]
    fn page_deserializes_with_null_items_and_unknown_entries() {
        let page: Page = serde_json::from_value(sample_page()).expect("page should parse");

        assert_eq!(page.path, "/");
        assert_eq!(page.seo_title.as_deref(), Some("Home"));

        let top: Vec<&Section> = page.top_sections().collect();
        assert_eq!(top.len(), 2, "null section items are skipped");
        assert_eq!(page.bottom_sections().count(), 0);

        match top[1] {
            Section::PageSectionList(list) => {
                let entries: Vec<&ContentEntry> =
                    list.list.as_ref().expect("list").entries().collect();
                assert_eq!(entries.len(), 2);
                assert!(matches!(entries[0], ContentEntry::Product(_)));
                assert!(matches!(entries[1], ContentEntry::Unknown(_)));
                assert_eq!(entries[1].typename(), "Testimonial");
                assert_eq!(entries[1].id(), Some("t1"));
            }
            other => panic!("expected a list section, got {:?}", other),
        }
    }

    #[test]
    fn unknown_section_typename_keeps_raw_json() {
        let raw = json!({ "__typename": "PageSectionCarousel", "sys": { "id": "x" }, "userInterface": "carousel" });
        let section: Section = serde_json::from_value(raw.clone()).expect("section should parse");

        assert_eq!(section, Section::Unknown(raw));
        assert_eq!(section.typename(), "PageSectionCarousel");
        assert_eq!(section.id(), Some("x"));
        assert_eq!(section.user_interface(), "carousel");
    }

    #[test]
    fn entry_without_typename_is_unknown() {
        let entry: ContentEntry =
            serde_json::from_value(json!({ "title": "orphan" })).expect("entry should parse");
        assert_eq!(entry.typename(), "<missing __typename>");
        assert_eq!(entry.id(), None);
    }

    #[test]
    fn known_entry_serializes_with_its_typename() {
        let entry = ContentEntry::Article(Article {
            title: Some("Launch".into()),
            ..Default::default()
        });
        let value = serde_json::to_value(&entry).expect("serialize");
        assert_eq!(value["__typename"], json!("Article"));
        assert_eq!(value["title"], json!("Launch"));
    }

    #[test]
    fn site_config_slugs_fall_back_when_blank() {
        let cfg: SiteConfig =
            serde_json::from_value(json!({ "newsSlug": "  ", "productsSlug": "shop" })).unwrap();
        assert_eq!(cfg.news_slug(), DEFAULT_NEWS_SLUG);
        assert_eq!(cfg.products_slug(), "shop");
    }
}
