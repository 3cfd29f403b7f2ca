// crates/serve/src/preview.rs

//! Live preview: the client script injected into preview renders, and
//! field-level updates pushed by the CMS editor.

use crate::Error;
use domain::content::Page;
use serde::Deserialize;
use serde_json::Value as Json;
use tracing::debug;

pub const LIVE_PREVIEW_SDK: &str = "https://esm.sh/@contentful/live-preview@4";
pub const REVALIDATE_ENDPOINT: &str = "/api/revalidate-preview";

/// Body of `POST /api/live-preview`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveUpdate {
    pub path: String,
    pub locale: Option<String>,
    pub entry_id: String,
    pub fields: Json,
}

/// Merge `fields` (RFC 7396) into every entry of `page` whose `sys.id` is
/// `entry_id`. Returns the updated page and the number of entries touched.
pub fn merge_live_update(page: &Page, entry_id: &str, fields: &Json) -> Result<(Page, usize), Error> {
    let mut doc = serde_json::to_value(page)?;
    let merged = merge_into(&mut doc, entry_id, fields);
    debug!(entry_id, merged, "applied live update");

    let page = serde_json::from_value(doc)?;
    Ok((page, merged))
}

fn merge_into(node: &mut Json, entry_id: &str, fields: &Json) -> usize {
    let is_target = node.pointer("/sys/id").and_then(Json::as_str) == Some(entry_id);

    let mut count: usize = match node {
        Json::Object(map) => map
            .values_mut()
            .map(|value| merge_into(value, entry_id, fields))
            .sum(),
        Json::Array(items) => items
            .iter_mut()
            .map(|item| merge_into(item, entry_id, fields))
            .sum(),
        _ => 0,
    };

    if is_target {
        json_patch::merge(node, fields);
        count += 1;
    }
    count
}

/// Client snippet appended to `<body>` on preview renders. It listens for
/// CMS save events, asks the server to drop its cached copy of the current
/// path, then reloads.
pub fn live_preview_script(locale: &str) -> String {
    let locale = html_escape::encode_double_quoted_attribute(locale);
    format!(
        r#"<script id="live-preview" type="module" data-locale="{locale}">
import {{ ContentfulLivePreview }} from "{LIVE_PREVIEW_SDK}";
const {{ locale }} = document.getElementById("live-preview").dataset;
ContentfulLivePreview.init({{ locale, enableInspectorMode: true, enableLiveUpdates: true }});
ContentfulLivePreview.subscribe("save", {{
  callback: async () => {{
    const pathname = encodeURIComponent(window.location.pathname);
    await fetch("{REVALIDATE_ENDPOINT}?pathname=" + pathname);
    window.location.reload();
  }},
}});
</script>"#
    )
}
