// crates/edge/src/router.rs

use crate::state::AppState;
use crate::Error;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use commerce::CommerceState;
use serde::Deserialize;
use serde_json::{json, Value};
use serve::page::{build_view, Metadata};
use serve::preview::{live_preview_script, merge_live_update, LiveUpdate};
use serve::render::{render_not_found_to, render_page_to};
use serve::{load_page, page_metadata, ContentSource, PageKey, RequestCache};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub const MERGED_HEADER: &str = "x-live-preview-merged";

// ─────────────────────────────────────────────────────────────────────────────
// Router construction
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip_all)]
pub fn build(state: AppState, commerce: Option<CommerceState>) -> Router {
    let site = Router::new()
        .route("/api/revalidate-preview", get(revalidate_preview))
        .route("/api/live-preview", post(live_preview))
        .route("/", get(render_page))
        .route("/{*path}", get(render_page))
        .with_state(state);

    let app = match commerce {
        Some(commerce) => site.merge(commerce::router(commerce)),
        None => site,
    };

    app.layer(TraceLayer::new_for_http())
}

/// Top-level service: trailing slashes are trimmed before routing so
/// `/about/` and `/about` hit the same page.
pub fn app_router(state: AppState, commerce: Option<CommerceState>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build(state, commerce))
}

// ─────────────────────────────────────────────────────────────────────────────
// Pages
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    preview: Option<String>,
}

fn html_response(status: StatusCode, body: Vec<u8>, cache_control: &str) -> Response {
    let mut resp = (status, Html(body)).into_response();
    if let Ok(value) = HeaderValue::from_str(cache_control) {
        resp.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    resp
}

fn not_found(state: &AppState, path: &str, locale: &str) -> Result<Response, Error> {
    let mut body = Vec::new();
    render_not_found_to(state.engine.as_ref(), path, locale, &state.home(locale), &mut body)?;
    Ok(html_response(StatusCode::NOT_FOUND, body, "no-store"))
}

#[tracing::instrument(skip_all, fields(uri = %uri))]
async fn render_page(
    State(state): State<AppState>,
    uri: Uri,
    Query(query): Query<PageQuery>,
) -> Result<Response, Error> {
    let (locale, path) = state.split_locale(uri.path());
    let preview = state.site.allow_preview && query.preview.as_deref() == Some("true");
    let key = PageKey::new(path, locale, preview);

    let cache = RequestCache::new();
    let meta = page_metadata(state.source(), &cache, &key).await;
    let Some(view) = load_page(state.source(), &cache, &key, &state.site).await? else {
        return not_found(&state, &key.path, locale);
    };

    let script = preview.then(|| live_preview_script(locale));
    let mut body = Vec::new();
    render_page_to(state.engine.as_ref(), &meta, &view, script.as_deref(), &mut body)?;

    let cache_control = if preview {
        "no-store".to_string()
    } else {
        format!("public, max-age=0, s-maxage={}", state.site.revalidate_secs)
    };
    Ok(html_response(StatusCode::OK, body, &cache_control))
}

// ─────────────────────────────────────────────────────────────────────────────
// Live preview
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RevalidateQuery {
    pathname: Option<String>,
}

#[tracing::instrument(skip_all)]
async fn revalidate_preview(
    State(state): State<AppState>,
    Query(query): Query<RevalidateQuery>,
) -> Result<Json<Value>, Error> {
    let pathname = query
        .pathname
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| Error::BadRequest("pathname is required".into()))?;

    let (_, path) = state.split_locale(&pathname);
    let evicted = state.content.invalidate_path(path);
    info!(%pathname, evicted, "revalidated");

    Ok(Json(json!({
        "revalidated": true,
        "pathname": pathname,
        "evicted": evicted,
        "now": Utc::now().timestamp_millis(),
    })))
}

#[tracing::instrument(skip_all)]
async fn live_preview(
    State(state): State<AppState>,
    payload: Result<Json<LiveUpdate>, JsonRejection>,
) -> Result<Response, Error> {
    if !state.site.allow_preview {
        return Err(Error::PreviewDisabled);
    }
    let Json(update) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;

    let locale = update
        .locale
        .clone()
        .unwrap_or_else(|| state.site.default_locale.clone());
    let key = PageKey::new(&update.path, &locale, true);

    let Some(page) = state.source().page(&key).await? else {
        return Err(Error::PageNotFound(key.path));
    };

    let (page, merged) = merge_live_update(&page, &update.entry_id, &update.fields)?;
    debug!(entry_id = %update.entry_id, merged, "live update merged");

    let config = state.source().site_config(&locale, true).await?;
    let view = build_view(&page, &config, &key, &state.site);
    let script = live_preview_script(&locale);

    let mut body = Vec::new();
    render_page_to(state.engine.as_ref(), &Metadata::of(&page), &view, Some(&script), &mut body)?;

    let mut resp = html_response(StatusCode::OK, body, "no-store");
    resp.headers_mut()
        .insert(MERGED_HEADER, HeaderValue::from(merged));
    Ok(resp)
}
