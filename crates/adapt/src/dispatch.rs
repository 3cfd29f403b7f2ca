// crates/adapt/src/dispatch.rs

//! Union dispatch: pick the leaf adapter for a polymorphic entry.

use crate::entry::{article_card, content_item_card, document_card, product_card};
use crate::links::Links;
use domain::card::{ArticleCard, Card, ListCard, ProductCard};
use domain::content::{ContentEntry, SectionList};

/// Card for an item section's `content`. Unknown or missing content maps to
/// `None`.
pub fn item_card(content: Option<&ContentEntry>, links: &Links) -> Option<Card> {
    match content? {
        ContentEntry::Article(a) => Some(article_card(a, links).into()),
        ContentEntry::Product(p) => Some(product_card(p, links).into()),
        ContentEntry::Document(d) => Some(document_card(d).into()),
        ContentEntry::ContentItem(c) => Some(content_item_card(c)),
        ContentEntry::Unknown(_) => None,
    }
}

/// Which card type a list renders, chosen from the section's free-text tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Products,
    News,
}

impl ListKind {
    /// `"product"` wins over `"news"` when a tag mentions both.
    pub fn classify(user_interface: &str) -> Option<Self> {
        let tag = user_interface.to_ascii_lowercase();
        if tag.contains("product") {
            Some(ListKind::Products)
        } else if tag.contains("news") {
            Some(ListKind::News)
        } else {
            None
        }
    }
}

pub fn as_product(entry: &ContentEntry, links: &Links) -> Option<ProductCard> {
    match entry {
        ContentEntry::Product(p) => Some(product_card(p, links)),
        _ => None,
    }
}

pub fn as_article(entry: &ContentEntry, links: &Links) -> Option<ArticleCard> {
    match entry {
        ContentEntry::Article(a) => Some(article_card(a, links)),
        _ => None,
    }
}

/// Card for a list section. Entries whose type does not match the list kind
/// are dropped; order is preserved.
pub fn list_card(section: &SectionList, links: &Links) -> Option<ListCard> {
    let list = section.list.as_ref()?;
    let kind = ListKind::classify(section.user_interface.as_deref().unwrap_or_default())?;

    let mut card = ListCard {
        title: list.title.clone(),
        ..Default::default()
    };

    match kind {
        ListKind::Products => {
            card.products = Some(list.entries().filter_map(|e| as_product(e, links)).collect());
        }
        ListKind::News => {
            card.articles = Some(list.entries().filter_map(|e| as_article(e, links)).collect());
        }
    }

    Some(card)
}
