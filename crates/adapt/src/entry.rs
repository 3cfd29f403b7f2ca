// crates/adapt/src/entry.rs

//! Leaf adapters: one CMS entry in, one normalized card out.
//!
//! Titles and names are copied verbatim (missing → empty string). Optional
//! text is passed through untouched. An image is produced only when the asset
//! carries a non-blank URL.

use crate::links::Links;
use domain::card::{ArticleCard, Card, CardImage, DocumentCard, ProductCard};
use domain::content::{non_blank, Article, Asset, ContentItem, Document, Product};

/// Asset URLs from the CMS are often protocol-relative (`//images...`).
fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

/// Alt text chain: explicit alt → asset description → asset title → "".
pub fn card_image(asset: Option<&Asset>, explicit_alt: Option<&str>) -> Option<CardImage> {
    let asset = asset?;
    let url = non_blank(asset.url.as_deref())?;

    let alt = non_blank(explicit_alt)
        .or_else(|| non_blank(asset.description.as_deref()))
        .or_else(|| non_blank(asset.title.as_deref()))
        .unwrap_or_default();

    Some(CardImage {
        url: absolute_url(url),
        alt: alt.to_string(),
        width: asset.width,
        height: asset.height,
    })
}

pub fn article_card(article: &Article, links: &Links) -> ArticleCard {
    ArticleCard {
        title: article.title.clone().unwrap_or_default(),
        excerpt: article.excerpt.clone(),
        image: card_image(
            article.featured_image.as_ref(),
            article.featured_image_alt.as_deref(),
        ),
        url: non_blank(article.slug.as_deref()).map(|slug| links.article(slug)),
        published_date: article.published_date.clone(),
    }
}

pub fn product_card(product: &Product, links: &Links) -> ProductCard {
    ProductCard {
        name: product.name.clone().unwrap_or_default(),
        description: product.description.clone(),
        image: card_image(product.primary_image(), None),
        price: product.price,
        url: non_blank(product.slug.as_deref()).map(|slug| links.product(slug)),
    }
}

pub fn document_card(document: &Document) -> DocumentCard {
    DocumentCard {
        title: document.title.clone().unwrap_or_default(),
        description: document.description.clone(),
        image: card_image(document.thumbnail.as_ref(), None),
        file_url: document
            .file
            .as_ref()
            .and_then(|f| non_blank(f.url.as_deref()))
            .map(absolute_url),
    }
}

pub fn content_item_card(item: &ContentItem) -> Card {
    Card {
        title: item.title.clone().unwrap_or_default(),
        description: item.body.clone(),
        image: card_image(item.image.as_ref(), item.image_alt.as_deref()),
        cta_text: non_blank(item.cta_text.as_deref()).map(str::to_string),
        cta_url: non_blank(item.cta_url.as_deref()).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::content::{Collection, Sys};

    fn asset(url: Option<&str>, title: Option<&str>, description: Option<&str>) -> Asset {
        Asset {
            url: url.map(Into::into),
            title: title.map(Into::into),
            description: description.map(Into::into),
            width: Some(1200),
            height: Some(630),
        }
    }

    #[test]
    fn alt_text_falls_back_through_the_chain() {
        let a = asset(Some("//img/x.jpg"), Some("Asset title"), Some("Asset description"));

        let img = card_image(Some(&a), Some("Explicit")).unwrap();
        assert_eq!(img.alt, "Explicit");

        let img = card_image(Some(&a), Some("   ")).unwrap();
        assert_eq!(img.alt, "Asset description");

        let b = asset(Some("//img/x.jpg"), Some("Asset title"), None);
        assert_eq!(card_image(Some(&b), None).unwrap().alt, "Asset title");

        let c = asset(Some("//img/x.jpg"), None, None);
        assert_eq!(card_image(Some(&c), None).unwrap().alt, "");
    }

    #[test]
    fn image_is_absent_iff_the_asset_has_no_url() {
        assert_eq!(card_image(None, Some("alt")), None);
        assert_eq!(card_image(Some(&asset(None, Some("t"), None)), None), None);
        assert_eq!(card_image(Some(&asset(Some(""), None, None)), None), None);

        let img = card_image(Some(&asset(Some("//img/x.jpg"), None, None)), None).unwrap();
        assert_eq!(img.url, "https://img/x.jpg");
        assert_eq!(img.width, Some(1200));
    }

    #[test]
    fn article_card_copies_title_and_builds_link() {
        let article = Article {
            sys: Sys { id: "a1".into() },
            title: Some("  Spaced Title ".into()),
            slug: Some("spring-launch".into()),
            excerpt: Some("Short".into()),
            featured_image: None,
            featured_image_alt: None,
            published_date: Some("2024-03-01".into()),
        };

        let card = article_card(&article, &Links::default());
        assert_eq!(card.title, "  Spaced Title ");
        assert_eq!(card.excerpt.as_deref(), Some("Short"));
        assert_eq!(card.url.as_deref(), Some("/news/spring-launch"));
        assert_eq!(card.image, None);
    }

    #[test]
    fn product_card_uses_first_non_null_image_and_defaults_name() {
        let product = Product {
            images_collection: Some(Collection {
                items: vec![None, Some(asset(Some("https://img/p.png"), Some("Kettle"), None))],
            }),
            price: Some(19.99),
            ..Default::default()
        };

        let card = product_card(&product, &Links::default());
        assert_eq!(card.name, "");
        assert_eq!(card.price, Some(19.99));
        assert_eq!(card.url, None);
        let img = card.image.expect("image from second item");
        assert_eq!(img.url, "https://img/p.png");
        assert_eq!(img.alt, "Kettle");
    }

    #[test]
    fn document_card_links_to_the_file() {
        let document = Document {
            title: Some("Spec sheet".into()),
            file: Some(asset(Some("//assets/spec.pdf"), None, None)),
            ..Default::default()
        };
        let card = document_card(&document);
        assert_eq!(card.file_url.as_deref(), Some("https://assets/spec.pdf"));
        assert_eq!(card.image, None);
    }

    #[test]
    fn content_item_blank_cta_is_dropped() {
        let item = ContentItem {
            title: Some("Welcome".into()),
            cta_text: Some(" ".into()),
            cta_url: Some("/shop".into()),
            ..Default::default()
        };
        let card = content_item_card(&item);
        assert_eq!(card.title, "Welcome");
        assert_eq!(card.cta_text, None);
        assert_eq!(card.cta_url.as_deref(), Some("/shop"));
    }
}
