//! Command handlers for the game context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the player, resolve the choice, persist
//! the new stats together with the action log entry.

use litera_core::clock::Clock;
use litera_core::command::Command;
use litera_core::error::DomainError;
use litera_core::store::{SessionStore, StoredActionLog};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::commands::{StartSession, SubmitChoice};
use crate::domain::module::GameModule;
use crate::domain::outcome::Outcome;
use crate::domain::player::Player;
use crate::domain::resolver;

/// How many times a choice is re-resolved after losing a version race.
pub const MAX_CHOICE_ATTEMPTS: u32 = 3;

/// Result of a successfully handled `SubmitChoice` command.
#[derive(Debug)]
pub struct ChoiceResult {
    /// The player after the choice was applied.
    pub player: Player,
    /// What the choice did.
    pub outcome: Outcome,
    /// Identifier of the appended log entry.
    pub log_id: Uuid,
}

pub(crate) async fn load_existing(
    session_id: &str,
    store: &dyn SessionStore,
) -> Result<Player, DomainError> {
    store
        .load_player(session_id)
        .await?
        .map(Player::from)
        .ok_or_else(|| DomainError::SessionNotFound(session_id.to_owned()))
}

/// Handles the `StartSession` command: returns the stored player for the
/// session, creating one with default stats if none exists.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_start_session(
    command: &StartSession,
    store: &dyn SessionStore,
) -> Result<Player, DomainError> {
    if let Some(existing) = store.load_player(command.session_id()).await? {
        info!(
            correlation_id = %command.correlation_id(),
            command_type = command.command_type(),
            "resuming existing session"
        );
        return Ok(Player::from(existing));
    }

    let created = store
        .create_player_if_absent(&Player::new(command.session_id()).to_stored())
        .await?;
    info!(
        correlation_id = %command.correlation_id(),
        command_type = command.command_type(),
        "created player"
    );
    Ok(Player::from(created))
}

/// Handles the `SubmitChoice` command: loads the player, resolves the
/// choice, and records the new stats and the log entry in one store call.
///
/// If another writer updated the player in between, the choice is resolved
/// again against the fresh stats, up to [`MAX_CHOICE_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` if the session was never started,
/// `DomainError::UnknownModule` if the module tag is not recognized,
/// `DomainError::ConcurrencyConflict` if every attempt lost a version race,
/// and `DomainError::Infrastructure` if the store fails.
pub async fn handle_submit_choice(
    command: &SubmitChoice,
    clock: &dyn Clock,
    store: &dyn SessionStore,
) -> Result<ChoiceResult, DomainError> {
    let mut player = load_existing(command.session_id(), store).await?;
    let module: GameModule = command.module.parse()?;
    let payload = Value::Object(command.payload.clone());

    let mut attempt = 1;
    loop {
        let resolution = resolver::resolve(&player.stats, module, &command.payload);
        let updated = player.advance(resolution.stats);
        let log = StoredActionLog {
            log_id: Uuid::new_v4(),
            session_id: command.session_id.clone(),
            module: module.as_str().to_owned(),
            action_type: command.action_type.clone(),
            payload: payload.clone(),
            outcome: resolution.outcome.to_json(),
            created_at: clock.now(),
        };

        match store
            .record_choice(&updated.to_stored(), player.version, &log)
            .await
        {
            Ok(()) => {
                info!(
                    correlation_id = %command.correlation_id(),
                    command_type = command.command_type(),
                    module = %module,
                    log_id = %log.log_id,
                    no_effect = resolution.outcome.is_no_effect(),
                    "choice recorded"
                );
                return Ok(ChoiceResult {
                    player: updated,
                    outcome: resolution.outcome,
                    log_id: log.log_id,
                });
            }
            Err(DomainError::ConcurrencyConflict {
                expected, actual, ..
            }) if attempt < MAX_CHOICE_ATTEMPTS => {
                warn!(
                    correlation_id = %command.correlation_id(),
                    attempt,
                    expected,
                    actual,
                    "player changed during choice; resolving again"
                );
                attempt += 1;
                player = load_existing(command.session_id(), store).await?;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use litera_core::error::DomainError;
    use litera_core::store::StoredPlayer;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::application::command_handlers::{
        MAX_CHOICE_ATTEMPTS, handle_start_session, handle_submit_choice,
    };
    use crate::domain::commands::{StartSession, SubmitChoice};
    use litera_test_support::{
        ContendedSessionStore, FailingSessionStore, FixedClock, InMemorySessionStore,
    };

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn start(session_id: &str) -> StartSession {
        StartSession {
            correlation_id: Uuid::new_v4(),
            session_id: session_id.to_owned(),
        }
    }

    fn choice(session_id: &str, module: &str, payload: Value) -> SubmitChoice {
        let Value::Object(payload) = payload else {
            panic!("payload must be an object");
        };
        SubmitChoice {
            correlation_id: Uuid::new_v4(),
            session_id: session_id.to_owned(),
            module: module.to_owned(),
            action_type: "test_action".to_owned(),
            payload,
        }
    }

    fn stored(session_id: &str, public_trust: i32, version: i64) -> StoredPlayer {
        StoredPlayer {
            session_id: session_id.to_owned(),
            public_trust,
            personal_clout: 50,
            professional_skill: 0,
            relationships: BTreeMap::new(),
            version,
        }
    }

    // --- start session ---

    #[tokio::test]
    async fn test_handle_start_session_creates_default_player() {
        // Arrange
        let store = InMemorySessionStore::new();

        // Act
        let player = handle_start_session(&start("s-1"), &store).await.unwrap();

        // Assert
        assert_eq!(player.session_id, "s-1");
        assert_eq!(player.stats.public_trust.value(), 50);
        assert_eq!(player.stats.personal_clout.value(), 50);
        assert_eq!(player.stats.professional_skill.value(), 0);
        assert!(player.stats.relationships.is_empty());
        assert_eq!(store.player("s-1").unwrap(), player.to_stored());
    }

    #[tokio::test]
    async fn test_handle_start_session_is_idempotent_after_progress() {
        // Arrange
        let store = InMemorySessionStore::new();
        handle_start_session(&start("s-1"), &store).await.unwrap();
        let clock = fixed_clock();
        let after_choice = handle_submit_choice(
            &choice("s-1", "ethical", json!({ "choice": "intervene" })),
            &clock,
            &store,
        )
        .await
        .unwrap();

        // Act
        let resumed = handle_start_session(&start("s-1"), &store).await.unwrap();

        // Assert
        assert_eq!(resumed, after_choice.player);
        assert_eq!(resumed.stats.public_trust.value(), 56);
    }

    #[tokio::test]
    async fn test_handle_start_session_propagates_store_failure() {
        let result = handle_start_session(&start("s-1"), &FailingSessionStore).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    // --- submit choice ---

    #[tokio::test]
    async fn test_handle_submit_choice_persists_stats_and_appends_log() {
        // Arrange
        let store = InMemorySessionStore::with_players([stored("s-1", 50, 0)]);
        let clock = fixed_clock();
        let command = choice(
            "s-1",
            "prebunking",
            json!({ "label": "verified", "truth": "verified" }),
        );

        // Act
        let result = handle_submit_choice(&command, &clock, &store).await.unwrap();

        // Assert
        assert_eq!(result.player.stats.public_trust.value(), 55);
        assert_eq!(result.player.stats.personal_clout.value(), 52);
        assert_eq!(result.player.version, 1);
        assert_eq!(store.player("s-1").unwrap(), result.player.to_stored());

        let logs = store.action_logs();
        assert_eq!(logs.len(), 1);
        let log = &logs[0];
        assert_eq!(log.log_id, result.log_id);
        assert_eq!(log.session_id, "s-1");
        assert_eq!(log.module, "prebunking");
        assert_eq!(log.action_type, "test_action");
        assert_eq!(log.payload, json!({ "label": "verified", "truth": "verified" }));
        assert_eq!(log.outcome, result.outcome.to_json());
        assert_eq!(log.created_at, clock.0);
    }

    #[tokio::test]
    async fn test_handle_submit_choice_logs_lower_cased_module() {
        let store = InMemorySessionStore::with_players([stored("s-1", 50, 0)]);

        handle_submit_choice(
            &choice("s-1", "Professional", json!({ "success": true })),
            &fixed_clock(),
            &store,
        )
        .await
        .unwrap();

        assert_eq!(store.action_logs()[0].module, "professional");
    }

    #[tokio::test]
    async fn test_handle_submit_choice_no_effect_still_logs() {
        let store = InMemorySessionStore::with_players([stored("s-1", 50, 0)]);

        let result = handle_submit_choice(
            &choice("s-1", "ethical", json!({ "choice": "other" })),
            &fixed_clock(),
            &store,
        )
        .await
        .unwrap();

        assert!(result.outcome.is_no_effect());
        assert_eq!(result.player.stats.public_trust.value(), 50);
        assert_eq!(store.action_logs().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_submit_choice_returns_not_found_without_mutation() {
        // Arrange
        let store = InMemorySessionStore::new();

        // Act
        let result = handle_submit_choice(
            &choice("ghost", "ethical", json!({ "choice": "report" })),
            &fixed_clock(),
            &store,
        )
        .await;

        // Assert
        match result {
            Err(DomainError::SessionNotFound(id)) => assert_eq!(id, "ghost"),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
        assert!(store.player("ghost").is_none());
        assert!(store.action_logs().is_empty());
    }

    #[tokio::test]
    async fn test_handle_submit_choice_rejects_unknown_module_without_mutation() {
        // Arrange
        let store = InMemorySessionStore::with_players([stored("s-1", 50, 0)]);

        // Act
        let result = handle_submit_choice(
            &choice("s-1", "arcade", json!({})),
            &fixed_clock(),
            &store,
        )
        .await;

        // Assert
        match result {
            Err(DomainError::UnknownModule(tag)) => assert_eq!(tag, "arcade"),
            other => panic!("expected UnknownModule, got {other:?}"),
        }
        assert_eq!(store.player("s-1").unwrap(), stored("s-1", 50, 0));
        assert!(store.action_logs().is_empty());
    }

    #[tokio::test]
    async fn test_handle_submit_choice_re_resolves_after_losing_a_race() {
        // Arrange: a rival sets trust to 70 right before our first write.
        let store = ContendedSessionStore::new(stored("s-1", 50, 0), stored("s-1", 70, 0), 1);

        // Act
        let result = handle_submit_choice(
            &choice("s-1", "prebunking", json!({ "label": "hoax", "truth": "hoax" })),
            &fixed_clock(),
            &store,
        )
        .await
        .unwrap();

        // Assert: the rule was applied on top of the rival's stats.
        assert_eq!(result.player.stats.public_trust.value(), 75);
        assert_eq!(result.player.version, 2);
        assert_eq!(store.inner().action_logs().len(), 1);
    }

    #[tokio::test]
    async fn test_handle_submit_choice_gives_up_after_max_attempts() {
        let store = ContendedSessionStore::new(
            stored("s-1", 50, 0),
            stored("s-1", 70, 0),
            MAX_CHOICE_ATTEMPTS,
        );

        let result = handle_submit_choice(
            &choice("s-1", "professional", json!({ "success": true })),
            &fixed_clock(),
            &store,
        )
        .await;

        assert!(matches!(
            result,
            Err(DomainError::ConcurrencyConflict { .. })
        ));
        assert!(store.inner().action_logs().is_empty());
    }

    #[tokio::test]
    async fn test_handle_submit_choice_propagates_store_failure() {
        let result = handle_submit_choice(
            &choice("s-1", "ethical", json!({ "choice": "report" })),
            &fixed_clock(),
            &FailingSessionStore,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_repeated_failures_never_push_skill_below_zero() {
        let store = InMemorySessionStore::with_players([stored("s-1", 50, 0)]);
        let clock = fixed_clock();
        let failure = choice("s-1", "professional", json!({ "task": "email", "success": false }));

        for _ in 0..30 {
            let result = handle_submit_choice(&failure, &clock, &store).await.unwrap();
            assert_eq!(result.player.stats.professional_skill.value(), 0);
        }

        assert_eq!(store.player("s-1").unwrap().professional_skill, 0);
        assert_eq!(store.action_logs().len(), 30);
    }
}
