// crates/serve/src/render/pipeline.rs

use super::error::RenderError;
use super::html_rewriter::inject_before_body_end;
use super::template::TemplateEngine;
use crate::page::{Metadata, PageView};
use adapt::{Component, SectionView};
use serde::Serialize;
use serde_json::{json, Value as Json};
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutModel<'a> {
    title: &'a str,
    description: &'a str,
    path: &'a str,
    locale: &'a str,
    site_name: Option<&'a str>,
    body: String,
}

fn component_model(component: &Component) -> Result<Json, RenderError> {
    let mut tagged = serde_json::to_value(component)?;
    let mut props = tagged
        .get_mut("props")
        .map(Json::take)
        .unwrap_or_else(|| json!({}));

    if let (Component::FeatureBlockReversed(_), Json::Object(map)) = (component, &mut props) {
        map.insert("reversed".into(), Json::Bool(true));
    }
    Ok(props)
}

/// Render one resolved section to an HTML fragment. `Empty` renders nothing.
pub fn render_section<T: TemplateEngine>(engine: &T, view: &SectionView) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    match view {
        SectionView::Component(component) => {
            let model = component_model(component)?;
            engine.render_to_write(component.template_name(), &model, &mut buf)?;
        }
        SectionView::Placeholder(placeholder) => {
            engine.render_to_write("placeholder", placeholder, &mut buf)?;
        }
        SectionView::Empty => {}
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_layout<T, W>(
    engine: &T,
    model: &LayoutModel<'_>,
    live_preview: Option<&str>,
    mut out: W,
) -> Result<(), RenderError>
where
    T: TemplateEngine,
    W: Write,
{
    let mut buf = Vec::new();
    engine.render_to_write("layout", model, &mut buf)?;
    let html = String::from_utf8_lossy(&buf);

    match live_preview {
        Some(snippet) => {
            let rewritten = inject_before_body_end(&html, snippet)?;
            out.write_all(rewritten.as_bytes())?;
        }
        None => out.write_all(html.as_bytes())?,
    }
    Ok(())
}

/// Render a full page document: every section in order, wrapped in the
/// layout. `live_preview` is the client snippet for preview renders.
pub fn render_page_to<T, W>(
    engine: &T,
    meta: &Metadata,
    page: &PageView,
    live_preview: Option<&str>,
    out: W,
) -> Result<(), RenderError>
where
    T: TemplateEngine,
    W: Write,
{
    let mut body = String::new();
    for section in page.sections() {
        body.push_str(&render_section(engine, section)?);
    }

    let model = LayoutModel {
        title: &meta.title,
        description: &meta.description,
        path: &page.path,
        locale: &page.locale,
        site_name: page.site_name.as_deref(),
        body,
    };
    write_layout(engine, &model, live_preview, out)
}

/// Render the not-found document for `path`.
pub fn render_not_found_to<T, W>(
    engine: &T,
    path: &str,
    locale: &str,
    home: &str,
    out: W,
) -> Result<(), RenderError>
where
    T: TemplateEngine,
    W: Write,
{
    let mut buf = Vec::new();
    engine.render_to_write("not_found", &json!({ "path": path, "home": home }), &mut buf)?;

    let meta = Metadata::not_found();
    let model = LayoutModel {
        title: &meta.title,
        description: &meta.description,
        path,
        locale,
        site_name: None,
        body: String::from_utf8_lossy(&buf).into_owned(),
    };
    write_layout(engine, &model, None, out)
}
