//! `PostgreSQL` implementation of the `SessionStore` trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use litera_core::error::DomainError;
use litera_core::store::{SessionStore, StoreDiagnostics, StoredActionLog, StoredPlayer};

use crate::schema;

/// PostgreSQL-backed session store.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Creates a new `PgSessionStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PlayerRow {
    session_id: String,
    public_trust: i32,
    personal_clout: i32,
    professional_skill: i32,
    relationships: Json<BTreeMap<String, i32>>,
    version: i64,
}

impl From<PlayerRow> for StoredPlayer {
    fn from(row: PlayerRow) -> Self {
        Self {
            session_id: row.session_id,
            public_trust: row.public_trust,
            personal_clout: row.personal_clout,
            professional_skill: row.professional_skill,
            relationships: row.relationships.0,
            version: row.version,
        }
    }
}

#[derive(Debug, FromRow)]
struct ActionLogRow {
    log_id: Uuid,
    session_id: String,
    module: String,
    action_type: String,
    payload: serde_json::Value,
    outcome: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<ActionLogRow> for StoredActionLog {
    fn from(row: ActionLogRow) -> Self {
        Self {
            log_id: row.log_id,
            session_id: row.session_id,
            module: row.module,
            action_type: row.action_type,
            payload: row.payload,
            outcome: row.outcome,
            created_at: row.created_at,
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

impl PgSessionStore {
    async fn fetch_player(&self, session_id: &str) -> Result<Option<StoredPlayer>, DomainError> {
        let row = sqlx::query_as::<_, PlayerRow>(schema::SELECT_PLAYER)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(row.map(StoredPlayer::from))
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn load_player(&self, session_id: &str) -> Result<Option<StoredPlayer>, DomainError> {
        self.fetch_player(session_id).await
    }

    async fn create_player_if_absent(
        &self,
        player: &StoredPlayer,
    ) -> Result<StoredPlayer, DomainError> {
        let inserted = sqlx::query(schema::INSERT_PLAYER_IF_ABSENT)
            .bind(&player.session_id)
            .bind(player.public_trust)
            .bind(player.personal_clout)
            .bind(player.professional_skill)
            .bind(Json(player.relationships.clone()))
            .bind(player.version)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?
            .rows_affected();

        debug!(session_id = %player.session_id, inserted, "create_player_if_absent");

        // Read back so a concurrent creator's row wins consistently.
        self.fetch_player(&player.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::Infrastructure(format!(
                    "player {} vanished after insert",
                    player.session_id
                ))
            })
    }

    async fn record_choice(
        &self,
        player: &StoredPlayer,
        expected_version: i64,
        log: &StoredActionLog,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;

        let updated = sqlx::query(schema::UPDATE_PLAYER_IF_VERSION)
            .bind(&player.session_id)
            .bind(player.public_trust)
            .bind(player.personal_clout)
            .bind(player.professional_skill)
            .bind(Json(player.relationships.clone()))
            .bind(player.version)
            .bind(expected_version)
            .execute(&mut *tx)
            .await
            .map_err(infrastructure)?
            .rows_affected();

        if updated == 0 {
            let actual: Option<i64> = sqlx::query_scalar(schema::SELECT_PLAYER_VERSION)
                .bind(&player.session_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(infrastructure)?;
            tx.rollback().await.map_err(infrastructure)?;

            return Err(match actual {
                Some(actual) => DomainError::ConcurrencyConflict {
                    session_id: player.session_id.clone(),
                    expected: expected_version,
                    actual,
                },
                None => DomainError::SessionNotFound(player.session_id.clone()),
            });
        }

        sqlx::query(schema::INSERT_ACTION_LOG)
            .bind(log.log_id)
            .bind(&log.session_id)
            .bind(&log.module)
            .bind(&log.action_type)
            .bind(&log.payload)
            .bind(&log.outcome)
            .bind(log.created_at)
            .execute(&mut *tx)
            .await
            .map_err(infrastructure)?;

        tx.commit().await.map_err(infrastructure)?;

        debug!(
            session_id = %player.session_id,
            version = player.version,
            log_id = %log.log_id,
            "recorded choice"
        );
        Ok(())
    }

    async fn load_action_logs(
        &self,
        session_id: &str,
    ) -> Result<Vec<StoredActionLog>, DomainError> {
        let rows = sqlx::query_as::<_, ActionLogRow>(schema::SELECT_ACTION_LOGS)
            .bind(session_id)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(rows.into_iter().map(StoredActionLog::from).collect())
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, DomainError> {
        let database_name: String = sqlx::query_scalar(schema::SELECT_DATABASE_NAME)
            .fetch_one(&self.pool)
            .await
            .map_err(infrastructure)?;
        let collections: Vec<String> = sqlx::query_scalar(schema::SELECT_COLLECTIONS)
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(StoreDiagnostics {
            database_name,
            collections,
        })
    }
}
