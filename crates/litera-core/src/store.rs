//! Session store abstraction.
//!
//! The store holds one player record per session and an append-only action
//! log. Implementations live outside this crate (`PostgreSQL` in
//! `litera-store`, in-memory doubles in `litera-test-support`).

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a player.
///
/// Scores are kept as plain integers here; range checks belong to the
/// domain layer, which clamps on load and before every write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPlayer {
    /// Client-generated session identifier (unique key).
    pub session_id: String,
    /// Public trust score.
    pub public_trust: i32,
    /// Personal clout score.
    pub personal_clout: i32,
    /// Professional skill score.
    pub professional_skill: i32,
    /// Character name to affinity score.
    pub relationships: BTreeMap<String, i32>,
    /// Revision counter used for optimistic concurrency.
    pub version: i64,
}

/// Stored representation of one resolved choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredActionLog {
    /// Unique log entry identifier.
    pub log_id: Uuid,
    /// The session the choice was made in.
    pub session_id: String,
    /// Lower-cased module name.
    pub module: String,
    /// Free-form action label supplied by the client.
    pub action_type: String,
    /// Raw choice payload.
    pub payload: serde_json::Value,
    /// Outcome produced by the resolver.
    pub outcome: serde_json::Value,
    /// Timestamp of the choice.
    pub created_at: DateTime<Utc>,
}

/// Connectivity details reported by the diagnostic endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDiagnostics {
    /// Name of the connected database.
    pub database_name: String,
    /// Collection (table) names visible to the store.
    pub collections: Vec<String>,
}

/// Store for player records and their action logs.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the player for a session, if one exists.
    async fn load_player(&self, session_id: &str) -> Result<Option<StoredPlayer>, DomainError>;

    /// Insert `player` unless a record already exists for its session, and
    /// return whatever record is stored afterwards.
    async fn create_player_if_absent(
        &self,
        player: &StoredPlayer,
    ) -> Result<StoredPlayer, DomainError>;

    /// Replace the player's scores and append `log` as one unit.
    ///
    /// `player.version` is the new revision. The write succeeds only if the
    /// stored revision still equals `expected_version`; otherwise it fails
    /// with `DomainError::ConcurrencyConflict` and neither write happens.
    async fn record_choice(
        &self,
        player: &StoredPlayer,
        expected_version: i64,
        log: &StoredActionLog,
    ) -> Result<(), DomainError>;

    /// Load all log entries for a session, oldest first.
    async fn load_action_logs(&self, session_id: &str)
    -> Result<Vec<StoredActionLog>, DomainError>;

    /// Report connectivity details.
    async fn diagnostics(&self) -> Result<StoreDiagnostics, DomainError>;
}
