use assistant_registry::{
    AssistantDescriptor, Registry, SelectError, SelectionState, VisibilityMap, render_page,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::open_session;
use crate::AppState;

/// What the page script needs to bring the DOM in line with a selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub selected: String,
    /// Text of the "Active Assistant" panel.
    pub label: String,
    pub regions: VisibilityMap,
}

impl SelectionSnapshot {
    pub fn new(registry: &Registry, state: &SelectionState) -> Self {
        let page = render_page(registry, state);
        Self {
            selected: state.selected().to_string(),
            label: page.active_label,
            regions: page.visibility,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{error}")]
    SelectionRejected {
        error: SelectError,
        current: Box<SelectionSnapshot>,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::SelectionRejected { error, current } => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": error.error_code(),
                    "message": error.to_string(),
                    "current": current,
                })),
            )
                .into_response(),
        }
    }
}

pub async fn list_assistants(State(state): State<AppState>) -> Json<Vec<AssistantDescriptor>> {
    Json(state.registry.assistants().to_vec())
}

pub async fn get_selection(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SelectionSnapshot>) {
    let (jar, session) = open_session(&state, jar).await;
    let snapshot = SelectionSnapshot::new(&state.registry, &session.selection);
    (jar, Json(snapshot))
}

pub async fn post_selection(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<SelectRequest>,
) -> Response {
    let (jar, session) = open_session(&state, jar).await;

    match state
        .sessions
        .select(&state.registry, session.id, &req.name)
        .await
    {
        Ok(selection) => {
            state.metrics.selection_accepted();
            info!(
                session = %session.id,
                assistant = selection.selected(),
                "Selected assistant"
            );
            let snapshot = SelectionSnapshot::new(&state.registry, &selection);
            (jar, Json(snapshot)).into_response()
        }
        Err(error) => {
            state.metrics.selection_rejected();
            warn!(
                session = %session.id,
                requested = %req.name,
                kept = session.selection.selected(),
                "Rejected selection"
            );
            let kept = state
                .sessions
                .current(session.id)
                .await
                .unwrap_or(session.selection);
            let current = Box::new(SelectionSnapshot::new(&state.registry, &kept));
            (jar, ApiError::SelectionRejected { error, current }).into_response()
        }
    }
}
