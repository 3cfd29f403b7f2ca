// crates/adapt/src/section.rs

//! Section → component selection.
//!
//! Every section resolves to a [`SectionView`]: a component with its props, a
//! debug placeholder (development), or nothing (production). The editor tag
//! is parsed into [`UserInterface`] first, so all string matching happens in
//! one place.

use crate::dispatch::{item_card, list_card};
use crate::links::Links;
use domain::card::{Card, ListCard};
use domain::content::Section;
use domain::setting::RenderMode;
use domain::ui::{SectionKind, UserInterface};
use serde::Serialize;
use serde_json::Value as Json;
use std::fmt;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "component", content = "props", rename_all = "kebab-case")]
pub enum Component {
    Hero(Card),
    FeatureBlock(Card),
    FeatureBlockReversed(Card),
    CtaBanner(Card),
    ProductGrid(ListCard),
    NewsCards(ListCard),
}

impl Component {
    /// Template that renders this component.
    pub fn template_name(&self) -> &'static str {
        match self {
            Component::Hero(_) => "hero",
            Component::FeatureBlock(_) | Component::FeatureBlockReversed(_) => "feature_block",
            Component::CtaBanner(_) => "cta_banner",
            Component::ProductGrid(_) => "product_grid",
            Component::NewsCards(_) => "news_cards",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Debug block shown in development builds in place of a section that could
/// not be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    pub typename: String,
    pub section_id: Option<String>,
    pub user_interface: String,
    pub reason: String,
    pub severity: Severity,
    pub raw: Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "view", rename_all = "lowercase")]
pub enum SectionView {
    Component(Component),
    Placeholder(Placeholder),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Skip {
    UnknownSection,
    NoContent,
    Unimplemented(String),
    WrongKind { ui: String, kind: SectionKind },
    UnknownUi(String),
}

impl Skip {
    fn severity(&self) -> Severity {
        match self {
            Skip::NoContent | Skip::Unimplemented(_) | Skip::WrongKind { .. } => Severity::Warning,
            Skip::UnknownSection | Skip::UnknownUi(_) => Severity::Error,
        }
    }
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::UnknownSection => f.write_str("unknown section type"),
            Skip::NoContent => f.write_str("content could not be mapped to props"),
            Skip::Unimplemented(ui) => write!(f, "user interface {ui} is not implemented yet"),
            Skip::WrongKind { ui, kind } => {
                write!(f, "user interface {ui} cannot render a {kind} section")
            }
            Skip::UnknownUi(raw) => write!(f, "unknown user interface {raw:?}"),
        }
    }
}

enum Props {
    Item(Card),
    List(ListCard),
}

/// Map one section to what the page should render for it.
pub fn resolve_section(section: &Section, links: &Links, mode: RenderMode) -> SectionView {
    let (kind, props) = match section {
        Section::PageSectionItem(item) => (
            SectionKind::Item,
            item_card(item.content.as_ref(), links).map(Props::Item),
        ),
        Section::PageSectionList(list) => {
            (SectionKind::List, list_card(list, links).map(Props::List))
        }
        Section::Unknown(_) => return skip(section, mode, Skip::UnknownSection),
    };

    let ui = UserInterface::parse(section.user_interface());
    if let UserInterface::Unknown(raw) = &ui {
        return skip(section, mode, Skip::UnknownUi(raw.clone()));
    }

    let Some(props) = props else {
        return skip(section, mode, Skip::NoContent);
    };

    let component = match (&ui, props) {
        (UserInterface::Hero, Props::Item(card)) => Component::Hero(card),
        (UserInterface::FeatureBlock, Props::Item(card)) => Component::FeatureBlock(card),
        (UserInterface::FeatureBlockReversed, Props::Item(card)) => {
            Component::FeatureBlockReversed(card)
        }
        (UserInterface::CtaBanner, Props::Item(card)) => Component::CtaBanner(card),
        (UserInterface::ProductGrid, Props::List(card)) => Component::ProductGrid(card),
        (UserInterface::NewsCards, Props::List(card)) => Component::NewsCards(card),
        (UserInterface::Planned(planned), _) => {
            return skip(section, mode, Skip::Unimplemented(planned.as_str().to_string()));
        }
        (implemented, _) => {
            let reason = Skip::WrongKind {
                ui: implemented.to_string(),
                kind,
            };
            return skip(section, mode, reason);
        }
    };

    SectionView::Component(component)
}

fn skip(section: &Section, mode: RenderMode, reason: Skip) -> SectionView {
    let severity = reason.severity();
    let section_id = section.id().unwrap_or("<no id>");
    let typename = section.typename();
    let user_interface = section.user_interface();

    match severity {
        Severity::Warning => warn!(
            section_id,
            typename,
            user_interface,
            "section not rendered: {}",
            reason
        ),
        Severity::Error => error!(
            section_id,
            typename,
            user_interface,
            "section not rendered: {}",
            reason
        ),
    }

    if !mode.is_development() {
        return SectionView::Empty;
    }

    SectionView::Placeholder(Placeholder {
        typename: typename.to_string(),
        section_id: section.id().map(str::to_string),
        user_interface: user_interface.to_string(),
        reason: reason.to_string(),
        severity,
        raw: serde_json::to_value(section).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::content::{
        Article, Collection, ContentEntry, ContentItem, EntryList, Product, SectionItem,
        SectionList, Sys,
    };
    use serde_json::json;

    fn item_section(ui: &str, content: Option<ContentEntry>) -> Section {
        Section::PageSectionItem(SectionItem {
            sys: Sys { id: "item-1".into() },
            internal_name: None,
            user_interface: Some(ui.into()),
            content,
        })
    }

    fn welcome() -> ContentEntry {
        ContentEntry::ContentItem(ContentItem {
            title: Some("Welcome".into()),
            cta_text: Some("Shop now".into()),
            cta_url: Some("/products".into()),
            ..Default::default()
        })
    }

    fn list_section(ui: &str) -> Section {
        Section::PageSectionList(SectionList {
            sys: Sys { id: "list-1".into() },
            internal_name: None,
            user_interface: Some(ui.into()),
            list: Some(EntryList {
                sys: Sys::default(),
                title: Some("Latest".into()),
                items_collection: Some(
                    vec![
                        ContentEntry::Article(Article {
                            title: Some("Launch".into()),
                            ..Default::default()
                        }),
                        ContentEntry::Product(Product {
                            name: Some("Kettle".into()),
                            ..Default::default()
                        }),
                    ]
                    .into_iter()
                    .collect::<Collection<_>>(),
                ),
            }),
        })
    }

    fn dev(section: &Section) -> SectionView {
        resolve_section(section, &Links::default(), RenderMode::Development)
    }

    fn prod(section: &Section) -> SectionView {
        resolve_section(section, &Links::default(), RenderMode::Production)
    }

    #[test]
    fn implemented_item_tags_select_components() {
        match dev(&item_section("Hero", Some(welcome()))) {
            SectionView::Component(Component::Hero(card)) => {
                assert_eq!(card.title, "Welcome");
                assert_eq!(card.cta_text.as_deref(), Some("Shop now"));
            }
            other => panic!("expected hero, got {:?}", other),
        }

        assert!(matches!(
            dev(&item_section("Feature Block Reversed", Some(welcome()))),
            SectionView::Component(Component::FeatureBlockReversed(_))
        ));
        assert!(matches!(
            prod(&item_section("cta_banner", Some(welcome()))),
            SectionView::Component(Component::CtaBanner(_))
        ));
    }

    #[test]
    fn implemented_list_tags_select_components() {
        match prod(&list_section("News Cards")) {
            SectionView::Component(Component::NewsCards(card)) => {
                assert_eq!(card.articles.as_ref().map(Vec::len), Some(1));
                assert_eq!(card.products, None);
            }
            other => panic!("expected news cards, got {:?}", other),
        }

        match prod(&list_section("product-grid")) {
            SectionView::Component(Component::ProductGrid(card)) => {
                assert_eq!(card.products.as_ref().map(Vec::len), Some(1));
                assert_eq!(card.articles, None);
            }
            other => panic!("expected product grid, got {:?}", other),
        }
    }

    #[test]
    fn unmappable_content_falls_back() {
        let section = item_section(
            "Hero",
            Some(ContentEntry::Unknown(json!({ "__typename": "Quote" }))),
        );

        match dev(&section) {
            SectionView::Placeholder(p) => {
                assert_eq!(p.severity, Severity::Warning);
                assert_eq!(p.section_id.as_deref(), Some("item-1"));
                assert_eq!(p.raw["content"]["__typename"], json!("Quote"));
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
        assert_eq!(prod(&section), SectionView::Empty);
        assert_eq!(prod(&item_section("Hero", None)), SectionView::Empty);
    }

    #[test]
    fn planned_tags_warn_and_unknown_tags_error() {
        match dev(&item_section("Testimonial", Some(welcome()))) {
            SectionView::Placeholder(p) => {
                assert_eq!(p.severity, Severity::Warning);
                assert!(p.reason.contains("testimonial"));
            }
            other => panic!("expected placeholder, got {:?}", other),
        }

        match dev(&item_section("Mega Menu", Some(welcome()))) {
            SectionView::Placeholder(p) => {
                assert_eq!(p.severity, Severity::Error);
                assert_eq!(p.user_interface, "Mega Menu");
            }
            other => panic!("expected placeholder, got {:?}", other),
        }

        assert_eq!(prod(&item_section("Mega Menu", Some(welcome()))), SectionView::Empty);
    }

    #[test]
    fn unknown_list_tag_is_an_error_not_missing_content() {
        match dev(&list_section("Gallery")) {
            SectionView::Placeholder(p) => {
                assert_eq!(p.severity, Severity::Error);
                assert!(p.reason.contains("unknown user interface"), "{}", p.reason);
                assert_eq!(p.user_interface, "Gallery");
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
        assert_eq!(prod(&list_section("Gallery")), SectionView::Empty);
    }

    #[test]
    fn list_tag_on_item_section_is_a_kind_mismatch() {
        match dev(&item_section("Product Grid", Some(welcome()))) {
            SectionView::Placeholder(p) => {
                assert_eq!(p.severity, Severity::Warning);
                assert!(p.reason.contains("item section"), "{}", p.reason);
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
    }

    #[test]
    fn unknown_section_type_is_an_error_placeholder() {
        let section = Section::Unknown(json!({
            "__typename": "PageSectionCarousel",
            "sys": { "id": "c1" },
            "userInterface": "carousel"
        }));

        match dev(&section) {
            SectionView::Placeholder(p) => {
                assert_eq!(p.severity, Severity::Error);
                assert_eq!(p.typename, "PageSectionCarousel");
                assert_eq!(p.raw["sys"]["id"], json!("c1"));
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
        assert_eq!(prod(&section), SectionView::Empty);
    }

    #[test]
    fn resolution_is_repeatable() {
        let inputs = [
            item_section("Hero", Some(welcome())),
            item_section("nonsense", Some(welcome())),
            list_section("product grid"),
            list_section("gallery"),
        ];

        for section in &inputs {
            for mode in [RenderMode::Development, RenderMode::Production] {
                let first = resolve_section(section, &Links::default(), mode);
                let second = resolve_section(section, &Links::default(), mode);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn component_serializes_with_tag_and_props() {
        let view = prod(&item_section("hero", Some(welcome())));
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["kind"], json!("component"));
        assert_eq!(value["view"]["component"], json!("hero"));
        assert_eq!(value["view"]["props"]["title"], json!("Welcome"));
    }
}
