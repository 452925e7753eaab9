//! Cheque editor API handlers.
//!
//! Every response carries the full editor view, including the rendered
//! preview markup, so the browser only swaps HTML and wires up dragging.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    editor::{ChequeEditor, DropOutcome},
    form::ChequeFormData,
    layout::{DragPayload, Field, FieldPositions, Orientation},
    print::FALLBACK_SIZE,
    template::{RenderedTemplate, Size},
};

use super::super::state::{AppState, EditorSession};
use super::ApiError;

/// Request body for the preview endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// Session to regenerate. A new one is created when absent or expired.
    pub session: Option<Uuid>,
    #[serde(flatten)]
    pub form: ChequeFormData,
}

#[derive(Debug, Deserialize)]
pub struct OrientationRequest {
    pub orientation: Orientation,
}

/// A drop: the payload captured at drag start plus the pointer
/// displacement since then.
#[derive(Debug, Deserialize)]
pub struct DropRequest {
    pub payload: DragPayload,
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrintRequest {
    /// On-screen size of the template when print was pressed.
    #[serde(default)]
    pub display: Option<Size>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field: Field,
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Editor state as seen by the browser.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChequeView {
    pub session: Uuid,
    pub generation: u64,
    pub orientation: Orientation,
    pub amount_in_words: String,
    pub positions: Option<FieldPositions>,
    pub fields: Vec<FieldView>,
    pub display: Size,
    pub html: String,
}

fn display_size(state: &AppState, orientation: Orientation) -> Size {
    state
        .template
        .as_ref()
        .map(|t| t.oriented_size(orientation))
        .unwrap_or(FALLBACK_SIZE)
}

fn view(state: &AppState, session: Uuid, editor: &ChequeEditor) -> ChequeView {
    let orientation = editor.form().orientation;
    let display = display_size(state, orientation);
    let template_src = format!(
        "/api/template?orientation={}&v={}",
        orientation, state.boot_time
    );

    ChequeView {
        session,
        generation: editor.generation(),
        orientation,
        amount_in_words: editor.form().amount_in_words().to_string(),
        positions: editor.positions().copied(),
        fields: editor
            .fields()
            .into_iter()
            .map(|f| FieldView {
                field: f.field,
                text: f.text,
                x: f.position.x,
                y: f.position.y,
            })
            .collect(),
        display,
        html: editor.preview_html(&template_src, display),
    }
}

fn parse_session(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request("Invalid session ID"))
}

fn session_not_found() -> ApiError {
    ApiError::not_found("Session not found or expired")
}

/// POST /api/cheque/preview - validate the form and lay out a fresh preview.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<ChequeView>, ApiError> {
    let mut form = request.form;

    // With an account selected, its details replace whatever the client sent.
    // Without one, the client's bank fields and currency are used as given.
    let account_id = form.bank_account_id.trim().to_string();
    if !account_id.is_empty() {
        let account = state
            .accounts
            .lookup(&account_id)
            .await
            .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY, e.to_string()))?
            .ok_or_else(|| {
                ApiError::bad_request(format!("Unknown bank account '{}'", account_id))
            })?;
        form.select_bank(&account);
    }

    let mut sessions = state.sessions.write().await;
    let existing = request
        .session
        .and_then(|id| sessions.get(&id).map(|s| (id, s.editor.clone())));
    let (id, mut editor) = existing.unwrap_or_else(|| (Uuid::new_v4(), ChequeEditor::default()));

    *editor.form_mut() = form;
    editor
        .generate_preview()
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let response = view(&state, id, &editor);
    sessions.insert(id, EditorSession::new(editor));
    tracing::info!(session = %id, generation = response.generation, "cheque preview generated");

    Ok(Json(response))
}

/// GET /api/cheque/:id - current editor state.
pub async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ChequeView>, ApiError> {
    let id = parse_session(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
    session.touch();
    Ok(Json(view(&state, id, &session.editor)))
}

/// POST /api/cheque/:id/orientation - switch orientation and reset the layout.
pub async fn orientation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<OrientationRequest>,
) -> Result<Json<ChequeView>, ApiError> {
    let id = parse_session(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
    session.touch();
    session.editor.set_orientation(request.orientation);
    Ok(Json(view(&state, id, &session.editor)))
}

/// POST /api/cheque/:id/drop - move a field to where it was dropped.
pub async fn drop(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<DropRequest>,
) -> Result<Json<ChequeView>, ApiError> {
    let id = parse_session(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
    session.touch();

    match session
        .editor
        .drop_field(&request.payload, request.dx, request.dy)
    {
        DropOutcome::Applied(_) => Ok(Json(view(&state, id, &session.editor))),
        DropOutcome::Stale => Err(ApiError::conflict(
            "The layout was reset while dragging; drag the field again",
        )),
        DropOutcome::NoPreview => {
            Err(ApiError::conflict("Generate a preview before moving fields"))
        }
    }
}

/// POST /api/cheque/:id/print - the standalone print document.
pub async fn print(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<PrintRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_session(&id)?;

    // Clone the editor to release the lock before rasterizing
    let editor = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(session_not_found)?;
        session.touch();
        session.editor.clone()
    };
    if editor.positions().is_none() {
        return Err(ApiError::conflict("Generate a preview before printing"));
    }

    let html = tokio::task::spawn_blocking(move || {
        let orientation = editor.form().orientation;
        let rendered = state.template.as_ref().map(|template| {
            let rendered = RenderedTemplate::new(template, orientation);
            match request.display {
                Some(display) => rendered.with_display(display),
                None => rendered,
            }
        });
        editor.print_document(rendered.as_ref())
    })
    .await
    .map_err(|e| ApiError::internal(format!("Processing error: {}", e)))?;

    tracing::info!(session = %id, bytes = html.len(), "composed print document");
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html))
}
