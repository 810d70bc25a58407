//! Axum route handlers for the Roast API.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::roast::session::{roast_once, run_roast};
use crate::roast::view::{RoastView, SessionView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetTextRequest {
    pub resume_text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionRoastRequest {
    /// Replaces the session text before roasting when present.
    pub resume_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoastRequest {
    pub resume_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from(&*session))
}

/// PUT /api/v1/session/text
pub async fn handle_set_text(
    State(state): State<AppState>,
    Json(request): Json<SetTextRequest>,
) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.set_text(request.resume_text);
    Json(SessionView::from(&*session))
}

/// POST /api/v1/session/roast
///
/// Runs one roast on the session and waits for it. The body is optional; when
/// present it must be a JSON `SessionRoastRequest`, whatever the content type.
/// Model failures still return 200; the view then carries a single `Error` item.
pub async fn handle_session_roast(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionView>, AppError> {
    let request = parse_optional_body(&body)?;

    let view = run_roast(
        Arc::clone(&state.session),
        Arc::clone(&state.llm),
        request.resume_text,
    )
    .await?;
    Ok(Json(view))
}

fn parse_optional_body(body: &[u8]) -> Result<SessionRoastRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SessionRoastRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

/// POST /api/v1/session/clear
pub async fn handle_clear(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.session.lock().await;
    session.clear();
    Json(SessionView::from(&*session))
}

/// POST /api/v1/roast
///
/// Stateless roast: does not touch the interactive session.
pub async fn handle_roast(
    State(state): State<AppState>,
    Json(request): Json<RoastRequest>,
) -> Result<Json<RoastView>, AppError> {
    let view = roast_once(state.llm.as_ref(), &request.resume_text).await?;
    Ok(Json(view))
}
