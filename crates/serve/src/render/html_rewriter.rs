// crates/serve/src/render/html_rewriter.rs

use super::error::RenderError;
use lol_html::{element, html_content::ContentType, rewrite_str, Settings};

/// Append `snippet` as the last child of `<body>`. Documents without a body
/// element get the snippet at the end.
pub fn inject_before_body_end(html: &str, snippet: &str) -> Result<String, RenderError> {
    let mut injected = false;

    let settings = Settings {
        element_content_handlers: vec![element!("body", |el| {
            el.append(snippet, ContentType::Html);
            injected = true;
            Ok(())
        })],
        ..Settings::default()
    };

    let mut rewritten = rewrite_str(html, settings).map_err(|e| RenderError::LolHtml(e.to_string()))?;
    if !injected {
        rewritten.push_str(snippet);
    }
    Ok(rewritten)
}
