//! Routes for starting sessions and submitting choices.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use litera_game::application::command_handlers;
use litera_game::application::query_handlers::PlayerView;
use litera_game::domain::commands;
use litera_game::domain::outcome::Outcome;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /start.
#[derive(Debug, Deserialize)]
pub struct StartRequest {
    /// Client-generated session identifier.
    pub session_id: String,
}

/// Request body for POST /choice.
#[derive(Debug, Deserialize)]
pub struct ChoiceRequest {
    /// Session the choice belongs to.
    pub session_id: String,
    /// Module tag, matched case-insensitively.
    pub module: String,
    /// Free-form label recorded in the action log.
    pub action_type: String,
    /// Module-specific choice data.
    #[serde(default)]
    pub payload: Map<String, Value>,
}

/// Response body for POST /choice.
#[derive(Debug, Serialize)]
pub struct ChoiceResponse {
    /// Player stats after the choice.
    #[serde(flatten)]
    pub player: PlayerView,
    /// What the choice did.
    pub outcome: Outcome,
}

/// POST /start
#[instrument(skip(state, request), fields(session_id = %request.session_id))]
async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<PlayerView>, ApiError> {
    let command = commands::StartSession {
        correlation_id: Uuid::new_v4(),
        session_id: request.session_id,
    };

    info!(correlation_id = %command.correlation_id, "handling start_session command");

    let player = command_handlers::handle_start_session(&command, &*state.store).await?;

    Ok(Json(PlayerView::from(&player)))
}

/// POST /choice
#[instrument(
    skip(state, request),
    fields(session_id = %request.session_id, module = %request.module)
)]
async fn submit_choice(
    State(state): State<AppState>,
    Json(request): Json<ChoiceRequest>,
) -> Result<Json<ChoiceResponse>, ApiError> {
    let command = commands::SubmitChoice {
        correlation_id: Uuid::new_v4(),
        session_id: request.session_id,
        module: request.module,
        action_type: request.action_type,
        payload: request.payload,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_choice command");

    let result =
        command_handlers::handle_submit_choice(&command, state.clock.as_ref(), &*state.store)
            .await?;

    Ok(Json(ChoiceResponse {
        player: PlayerView::from(&result.player),
        outcome: result.outcome,
    }))
}

/// Returns the router for session and choice commands.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_session))
        .route("/choice", post(submit_choice))
}
