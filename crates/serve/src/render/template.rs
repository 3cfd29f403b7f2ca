// crates/serve/src/render/template.rs

use super::error::RenderError;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use std::io::Write;

/// Trait for template engines that can render to an arbitrary `Write`.
pub trait TemplateEngine: Send + Sync {
    fn render_to_write<M, W>(
        &self,
        template_name: &str,
        model: &M,
        out: &mut W,
    ) -> Result<(), RenderError>
    where
        M: Serialize,
        W: Write;
}

/// Component templates compiled into the binary, by registered name.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../../templates/layout.hbs")),
    ("hero", include_str!("../../templates/hero.hbs")),
    ("feature_block", include_str!("../../templates/feature_block.hbs")),
    ("cta_banner", include_str!("../../templates/cta_banner.hbs")),
    ("product_grid", include_str!("../../templates/product_grid.hbs")),
    ("news_cards", include_str!("../../templates/news_cards.hbs")),
    ("placeholder", include_str!("../../templates/placeholder.hbs")),
    ("not_found", include_str!("../../templates/not_found.hbs")),
];

handlebars_helper!(dump_json: |v: Json| {
    serde_json::to_string_pretty(&v).unwrap_or_else(|_| "<invalid json>".into())
});

handlebars_helper!(money: |v: f64| format!("{:.2}", v));

/// Handlebars-based template engine implementation.
pub struct HbsEngine {
    handlebars: Handlebars<'static>,
}

impl HbsEngine {
    /// Engine with helpers registered and no templates.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_helper("dump", Box::new(dump_json));
        handlebars.register_helper("money", Box::new(money));
        Self { handlebars }
    }

    /// Engine with every built-in component template registered.
    pub fn with_builtin_templates() -> Result<Self, RenderError> {
        let mut engine = Self::new();
        for (name, source) in BUILTIN_TEMPLATES {
            engine.register_template_str(name, source)?;
        }
        Ok(engine)
    }

    /// Register a template by name, replacing any template of the same name.
    pub fn register_template_str(&mut self, name: &str, template: &str) -> Result<(), RenderError> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(RenderError::from)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

impl Default for HbsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HbsEngine {
    fn render_to_write<M, W>(
        &self,
        template_name: &str,
        model: &M,
        out: &mut W,
    ) -> Result<(), RenderError>
    where
        M: Serialize,
        W: Write,
    {
        self.handlebars
            .render_to_write(template_name, model, out)
            .map_err(RenderError::from)
    }
}
