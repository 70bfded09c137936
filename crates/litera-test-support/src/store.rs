//! Test stores: `SessionStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use litera_core::error::DomainError;
use litera_core::store::{SessionStore, StoreDiagnostics, StoredActionLog, StoredPlayer};

#[derive(Debug, Default)]
struct Tables {
    players: HashMap<String, StoredPlayer>,
    action_logs: Vec<StoredActionLog>,
}

/// A session store backed by in-process maps.
///
/// Honors the same contract as the `PostgreSQL` store: insert-if-absent
/// creation, version-checked `record_choice` that writes both the player and
/// the log entry or neither.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    tables: Mutex<Tables>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `players`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_players(players: impl IntoIterator<Item = StoredPlayer>) -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.lock().unwrap();
            for player in players {
                tables.players.insert(player.session_id.clone(), player);
            }
        }
        store
    }

    /// Returns a snapshot of the stored player, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn player(&self, session_id: &str) -> Option<StoredPlayer> {
        self.tables.lock().unwrap().players.get(session_id).cloned()
    }

    /// Returns a snapshot of every log entry, in append order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn action_logs(&self) -> Vec<StoredActionLog> {
        self.tables.lock().unwrap().action_logs.clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load_player(&self, session_id: &str) -> Result<Option<StoredPlayer>, DomainError> {
        Ok(self.player(session_id))
    }

    async fn create_player_if_absent(
        &self,
        player: &StoredPlayer,
    ) -> Result<StoredPlayer, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .players
            .entry(player.session_id.clone())
            .or_insert_with(|| player.clone())
            .clone())
    }

    async fn record_choice(
        &self,
        player: &StoredPlayer,
        expected_version: i64,
        log: &StoredActionLog,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(stored) = tables.players.get_mut(&player.session_id) else {
            return Err(DomainError::SessionNotFound(player.session_id.clone()));
        };
        if stored.version != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                session_id: player.session_id.clone(),
                expected: expected_version,
                actual: stored.version,
            });
        }
        *stored = player.clone();
        tables.action_logs.push(log.clone());
        Ok(())
    }

    async fn load_action_logs(
        &self,
        session_id: &str,
    ) -> Result<Vec<StoredActionLog>, DomainError> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .action_logs
            .iter()
            .filter(|log| log.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, DomainError> {
        Ok(StoreDiagnostics {
            database_name: "memory".to_owned(),
            collections: vec!["action_logs".to_owned(), "players".to_owned()],
        })
    }
}

/// A store that always returns an infrastructure error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingSessionStore;

fn connection_refused() -> DomainError {
    DomainError::Infrastructure("connection refused".into())
}

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn load_player(&self, _session_id: &str) -> Result<Option<StoredPlayer>, DomainError> {
        Err(connection_refused())
    }

    async fn create_player_if_absent(
        &self,
        _player: &StoredPlayer,
    ) -> Result<StoredPlayer, DomainError> {
        Err(connection_refused())
    }

    async fn record_choice(
        &self,
        _player: &StoredPlayer,
        _expected_version: i64,
        _log: &StoredActionLog,
    ) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn load_action_logs(
        &self,
        _session_id: &str,
    ) -> Result<Vec<StoredActionLog>, DomainError> {
        Err(connection_refused())
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, DomainError> {
        Err(connection_refused())
    }
}

/// An in-memory store where a rival writer slips in before each of the
/// first `rival_writes` calls to `record_choice`.
///
/// The rival replaces the player with `rival_player` (with its version
/// bumped past the stored one), so the caller's write then conflicts.
#[derive(Debug)]
pub struct ContendedSessionStore {
    inner: InMemorySessionStore,
    rival_player: StoredPlayer,
    remaining: Mutex<u32>,
}

impl ContendedSessionStore {
    /// Creates a contended store seeded with `initial`.
    #[must_use]
    pub fn new(initial: StoredPlayer, rival_player: StoredPlayer, rival_writes: u32) -> Self {
        Self {
            inner: InMemorySessionStore::with_players([initial]),
            rival_player,
            remaining: Mutex::new(rival_writes),
        }
    }

    /// Returns the wrapped store for inspection.
    #[must_use]
    pub fn inner(&self) -> &InMemorySessionStore {
        &self.inner
    }

    fn rival_write(&self, session_id: &str) {
        let mut remaining = self.remaining.lock().unwrap();
        if *remaining == 0 {
            return;
        }
        *remaining -= 1;

        let mut tables = self.inner.tables.lock().unwrap();
        if let Some(stored) = tables.players.get_mut(session_id) {
            let version = stored.version + 1;
            *stored = StoredPlayer {
                version,
                ..self.rival_player.clone()
            };
        }
    }
}

#[async_trait]
impl SessionStore for ContendedSessionStore {
    async fn load_player(&self, session_id: &str) -> Result<Option<StoredPlayer>, DomainError> {
        self.inner.load_player(session_id).await
    }

    async fn create_player_if_absent(
        &self,
        player: &StoredPlayer,
    ) -> Result<StoredPlayer, DomainError> {
        self.inner.create_player_if_absent(player).await
    }

    async fn record_choice(
        &self,
        player: &StoredPlayer,
        expected_version: i64,
        log: &StoredActionLog,
    ) -> Result<(), DomainError> {
        self.rival_write(&player.session_id);
        self.inner.record_choice(player, expected_version, log).await
    }

    async fn load_action_logs(
        &self,
        session_id: &str,
    ) -> Result<Vec<StoredActionLog>, DomainError> {
        self.inner.load_action_logs(session_id).await
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, DomainError> {
        self.inner.diagnostics().await
    }
}
