//! Session store database schema.
//!
//! Table names are declared here once and spliced into every statement; the
//! DDL itself lives in the workspace `migrations/` directory.

macro_rules! players_table {
    () => {
        "players"
    };
}

macro_rules! action_logs_table {
    () => {
        "action_logs"
    };
}

/// Table holding one row per player session.
pub const PLAYERS_TABLE: &str = players_table!();

/// Append-only table of resolved choices.
pub const ACTION_LOGS_TABLE: &str = action_logs_table!();

pub(crate) const SELECT_PLAYER: &str = concat!(
    "SELECT session_id, public_trust, personal_clout, professional_skill, relationships, version FROM ",
    players_table!(),
    " WHERE session_id = $1"
);

pub(crate) const INSERT_PLAYER_IF_ABSENT: &str = concat!(
    "INSERT INTO ",
    players_table!(),
    " (session_id, public_trust, personal_clout, professional_skill, relationships, version)",
    " VALUES ($1, $2, $3, $4, $5, $6)",
    " ON CONFLICT (session_id) DO NOTHING"
);

pub(crate) const UPDATE_PLAYER_IF_VERSION: &str = concat!(
    "UPDATE ",
    players_table!(),
    " SET public_trust = $2, personal_clout = $3, professional_skill = $4,",
    " relationships = $5, version = $6, updated_at = NOW()",
    " WHERE session_id = $1 AND version = $7"
);

pub(crate) const SELECT_PLAYER_VERSION: &str = concat!(
    "SELECT version FROM ",
    players_table!(),
    " WHERE session_id = $1"
);

pub(crate) const INSERT_ACTION_LOG: &str = concat!(
    "INSERT INTO ",
    action_logs_table!(),
    " (log_id, session_id, module, action_type, payload, outcome, created_at)",
    " VALUES ($1, $2, $3, $4, $5, $6, $7)"
);

pub(crate) const SELECT_ACTION_LOGS: &str = concat!(
    "SELECT log_id, session_id, module, action_type, payload, outcome, created_at FROM ",
    action_logs_table!(),
    " WHERE session_id = $1 ORDER BY seq"
);

pub(crate) const SELECT_DATABASE_NAME: &str = "SELECT current_database()::text";

pub(crate) const SELECT_COLLECTIONS: &str = r"
SELECT table_name::text
FROM information_schema.tables
WHERE table_schema = 'public'
ORDER BY table_name
LIMIT 10
";
