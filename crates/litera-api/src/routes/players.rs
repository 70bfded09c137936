//! Read-side routes for player state and history.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use litera_game::application::query_handlers::{self, ActionHistoryView, PlayerView};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{session_id}
#[instrument(skip(state))]
async fn get_player(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<PlayerView>, ApiError> {
    let view = query_handlers::get_player(&session_id, &*state.store).await?;
    Ok(Json(view))
}

/// GET /{session_id}/actions
#[instrument(skip(state))]
async fn get_actions(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ActionHistoryView>, ApiError> {
    let view = query_handlers::get_action_history(&session_id, &*state.store).await?;
    Ok(Json(view))
}

/// Returns the router for player queries.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{session_id}", get(get_player))
        .route("/{session_id}/actions", get(get_actions))
}
