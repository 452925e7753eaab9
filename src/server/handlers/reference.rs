//! Reference data: template image, currency table, default layouts.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::layout::{FieldPositions, Orientation};
use crate::words::CURRENCIES;

use super::super::state::AppState;
use super::ApiError;

/// Query parameters for the template endpoint.
#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    #[serde(default)]
    pub orientation: Orientation,
}

#[derive(Debug, Serialize)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
}

/// GET /api/template - the template as PNG, rotated for the orientation.
pub async fn template(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TemplateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if state.template.is_none() {
        return Err(ApiError::not_found("No cheque template configured"));
    }

    let png = tokio::task::spawn_blocking(move || match &state.template {
        Some(template) => template.to_png(query.orientation),
        None => Ok(Vec::new()),
    })
    .await
    .map_err(|e| ApiError::internal(format!("Processing error: {}", e)))?
    .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

/// GET /api/currencies - supported currency codes and their names.
pub async fn currencies() -> Json<Vec<CurrencyInfo>> {
    Json(
        CURRENCIES
            .iter()
            .map(|&(code, name)| CurrencyInfo { code, name })
            .collect(),
    )
}

/// GET /api/layout/:orientation - default field positions.
pub async fn layout(Path(orientation): Path<String>) -> Result<Json<FieldPositions>, ApiError> {
    let orientation: Orientation = orientation.parse().map_err(ApiError::bad_request)?;
    Ok(Json(FieldPositions::defaults(orientation)))
}
