pub mod error;
pub mod html_rewriter;
pub mod pipeline;
pub mod template;

pub use error::RenderError;
pub use pipeline::{render_not_found_to, render_page_to, render_section};
pub use template::{HbsEngine, TemplateEngine};
