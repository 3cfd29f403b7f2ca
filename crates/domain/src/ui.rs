// crates/domain/src/ui.rs

//! Closed set of render variants behind the editor-facing `userInterface`
//! free-text field.
//!
//! Editors type whatever they like into the CMS, so the raw string is parsed
//! once at the data boundary. Every input maps to some variant; unrecognized
//! values are kept in [`UserInterface::Unknown`] for logging.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("separator regex is valid"));

/// Which section shape a variant renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Item,
    List,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Item => f.write_str("item"),
            SectionKind::List => f.write_str("list"),
        }
    }
}

/// Variants editors know about but that have no component yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlannedUi {
    Testimonial,
    ProductCarousel,
    NewsTicker,
    VideoEmbed,
}

impl PlannedUi {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlannedUi::Testimonial => "testimonial",
            PlannedUi::ProductCarousel => "product-carousel",
            PlannedUi::NewsTicker => "news-ticker",
            PlannedUi::VideoEmbed => "video-embed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInterface {
    Hero,
    FeatureBlock,
    FeatureBlockReversed,
    CtaBanner,
    ProductGrid,
    NewsCards,
    Planned(PlannedUi),
    Unknown(String),
}

impl UserInterface {
    pub fn parse(raw: &str) -> Self {
        let key = normalize(raw);
        match key.as_str() {
            "hero" => UserInterface::Hero,
            "feature-block" => UserInterface::FeatureBlock,
            "feature-block-reversed" => UserInterface::FeatureBlockReversed,
            "cta-banner" => UserInterface::CtaBanner,
            "product-grid" => UserInterface::ProductGrid,
            "news-cards" => UserInterface::NewsCards,
            "testimonial" => UserInterface::Planned(PlannedUi::Testimonial),
            "product-carousel" => UserInterface::Planned(PlannedUi::ProductCarousel),
            "news-ticker" => UserInterface::Planned(PlannedUi::NewsTicker),
            "video-embed" => UserInterface::Planned(PlannedUi::VideoEmbed),
            _ => UserInterface::Unknown(raw.to_string()),
        }
    }

    /// Section shape an implemented variant renders; `None` for planned and
    /// unknown variants.
    pub fn kind(&self) -> Option<SectionKind> {
        match self {
            UserInterface::Hero
            | UserInterface::FeatureBlock
            | UserInterface::FeatureBlockReversed
            | UserInterface::CtaBanner => Some(SectionKind::Item),
            UserInterface::ProductGrid | UserInterface::NewsCards => Some(SectionKind::List),
            UserInterface::Planned(_) | UserInterface::Unknown(_) => None,
        }
    }
}

impl fmt::Display for UserInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserInterface::Hero => f.write_str("hero"),
            UserInterface::FeatureBlock => f.write_str("feature-block"),
            UserInterface::FeatureBlockReversed => f.write_str("feature-block-reversed"),
            UserInterface::CtaBanner => f.write_str("cta-banner"),
            UserInterface::ProductGrid => f.write_str("product-grid"),
            UserInterface::NewsCards => f.write_str("news-cards"),
            UserInterface::Planned(p) => f.write_str(p.as_str()),
            UserInterface::Unknown(raw) => write!(f, "{raw:?}"),
        }
    }
}

fn normalize(raw: &str) -> String {
    SEPARATORS
        .replace_all(raw.trim(), "-")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!(UserInterface::parse("Hero"), UserInterface::Hero);
        assert_eq!(UserInterface::parse("  Product Grid "), UserInterface::ProductGrid);
        assert_eq!(UserInterface::parse("news_cards"), UserInterface::NewsCards);
        assert_eq!(
            UserInterface::parse("Feature  Block   Reversed"),
            UserInterface::FeatureBlockReversed
        );
    }

    #[test]
    fn planned_variants_are_recognized_but_have_no_kind() {
        let ui = UserInterface::parse("Product Carousel");
        assert_eq!(ui, UserInterface::Planned(PlannedUi::ProductCarousel));
        assert_eq!(ui.kind(), None);
    }

    #[test]
    fn anything_else_is_unknown_and_keeps_the_raw_value() {
        let ui = UserInterface::parse("Mega Menu!");
        assert_eq!(ui, UserInterface::Unknown("Mega Menu!".into()));
        assert_eq!(ui.kind(), None);
        assert_eq!(UserInterface::parse(""), UserInterface::Unknown(String::new()));
    }

    #[test]
    fn implemented_variants_know_their_section_kind() {
        assert_eq!(UserInterface::CtaBanner.kind(), Some(SectionKind::Item));
        assert_eq!(UserInterface::NewsCards.kind(), Some(SectionKind::List));
    }
}
