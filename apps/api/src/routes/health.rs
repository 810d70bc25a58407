use axum::{extract::State, Json};
use serde::Serialize;

use crate::llm_client::MODEL;
use crate::roast::view::SessionView;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: &'static str,
    /// Lets a front end notice a roast still cooking after a reload.
    pub session_phase: &'static str,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let session_phase = SessionView::from(&*state.session.lock().await).phase;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: MODEL,
        session_phase,
    })
}
