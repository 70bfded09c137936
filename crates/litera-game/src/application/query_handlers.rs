//! Query handlers for the game context.
//!
//! This module contains query handlers that read player records and the
//! action log and return read-only view DTOs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use litera_core::error::DomainError;
use litera_core::store::{SessionStore, StoredActionLog};
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::player::Player;

/// Read-only view of a player's stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    /// Client-generated session identifier.
    pub session_id: String,
    /// Public trust, 0-100.
    pub public_trust: i32,
    /// Personal clout, 0-100.
    pub personal_clout: i32,
    /// Professional skill, 0-100.
    pub professional_skill: i32,
    /// Affinity per character, 0-100.
    pub relationships: BTreeMap<String, i32>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            session_id: player.session_id.clone(),
            public_trust: player.stats.public_trust.value(),
            personal_clout: player.stats.personal_clout.value(),
            professional_skill: player.stats.professional_skill.value(),
            relationships: player.stats.relationships.to_values(),
        }
    }
}

/// Read-only view of one action log entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionLogView {
    /// Log entry identifier.
    pub log_id: Uuid,
    /// Module the choice belonged to.
    pub module: String,
    /// Free-form action label.
    pub action_type: String,
    /// Raw choice payload.
    pub payload: serde_json::Value,
    /// Outcome shown to the player.
    pub outcome: serde_json::Value,
    /// When the choice was made.
    pub created_at: DateTime<Utc>,
}

impl From<StoredActionLog> for ActionLogView {
    fn from(log: StoredActionLog) -> Self {
        Self {
            log_id: log.log_id,
            module: log.module,
            action_type: log.action_type,
            payload: log.payload,
            outcome: log.outcome,
            created_at: log.created_at,
        }
    }
}

/// A session's choices, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionHistoryView {
    /// The session the history belongs to.
    pub session_id: String,
    /// Log entries in the order they were recorded.
    pub actions: Vec<ActionLogView>,
}

/// Retrieves a player by session ID.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no player exists for the ID.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_player(
    session_id: &str,
    store: &dyn SessionStore,
) -> Result<PlayerView, DomainError> {
    let player = command_handlers::load_existing(session_id, store).await?;
    Ok(PlayerView::from(&player))
}

/// Retrieves the action history of a session.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if no player exists for the ID.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_action_history(
    session_id: &str,
    store: &dyn SessionStore,
) -> Result<ActionHistoryView, DomainError> {
    if store.load_player(session_id).await?.is_none() {
        return Err(DomainError::SessionNotFound(session_id.to_owned()));
    }
    let actions = store
        .load_action_logs(session_id)
        .await?
        .into_iter()
        .map(ActionLogView::from)
        .collect();
    Ok(ActionHistoryView {
        session_id: session_id.to_owned(),
        actions,
    })
}
