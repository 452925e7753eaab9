//! Embedded frontend: the editor page and its assets.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use include_dir::{Dir, include_dir};
use serde::Serialize;
use std::sync::Arc;

use crate::words::CURRENCIES;

use super::state::AppState;

static FRONTEND_DIST: Dir = include_dir!("$CARGO_MANIFEST_DIR/frontend/dist");

/// Assets are referenced with a `?v=<boot time>` suffix, so they never change
/// under a given URL.
const ASSET_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Serialize)]
struct CurrencyOption {
    code: &'static str,
    name: &'static str,
}

/// `<script>` defining `window.__CURRENCIES`, read by the form to label the
/// selected account's currency.
fn currency_table_script() -> String {
    let table: Vec<CurrencyOption> = CURRENCIES
        .iter()
        .map(|&(code, name)| CurrencyOption { code, name })
        .collect();
    let json = serde_json::to_string(&table).unwrap_or_else(|_| "[]".to_string());
    format!("<script>window.__CURRENCIES={};</script>", json)
}

/// Point asset links at `?v=<boot time>` so a restarted server is never
/// served stale scripts.
fn bust_asset_links(page: &str, boot_time: u64) -> String {
    let mut out = page.to_string();
    for ext in [".js\"", ".css\""] {
        let (stem, quote) = ext.split_at(ext.len() - 1);
        out = out.replace(ext, &format!("{}?v={}{}", stem, boot_time, quote));
    }
    out
}

/// GET / - the editor page.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let Some(page) = FRONTEND_DIST
        .get_file("index.html")
        .and_then(|file| file.contents_utf8())
    else {
        return (StatusCode::NOT_FOUND, "Frontend not built").into_response();
    };

    let page = bust_asset_links(page, state.boot_time)
        .replacen("</head>", &format!("{}</head>", currency_table_script()), 1);
    Html(page).into_response()
}

/// GET /assets/*path - embedded stylesheets and scripts.
pub async fn asset_handler(Path(path): Path<String>) -> Response {
    let name = path.split_once('?').map_or(path.as_str(), |(name, _)| name);
    let Some(file) = FRONTEND_DIST.get_file(format!("assets/{}", name)) else {
        tracing::debug!(asset = name, "unknown asset requested");
        return (StatusCode::NOT_FOUND, "Asset not found").into_response();
    };

    let content_type = mime_guess::from_path(name).first_or_octet_stream();
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CACHE_CONTROL, ASSET_CACHE_CONTROL.to_string()),
        ],
        file.contents(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bust_asset_links() {
        let page = r#"<link href="/assets/app.css"><script src="/assets/app.js"></script>"#;
        let busted = bust_asset_links(page, 42);
        assert!(busted.contains(r#"href="/assets/app.css?v=42""#));
        assert!(busted.contains(r#"src="/assets/app.js?v=42""#));
    }

    #[test]
    fn test_currency_table_script() {
        let script = currency_table_script();
        assert!(script.starts_with("<script>window.__CURRENCIES=["));
        assert!(script.contains(r#"{"code":"KWD","name":"Kuwaiti Dinars"}"#));
    }
}
