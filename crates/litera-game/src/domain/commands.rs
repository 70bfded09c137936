//! Commands for the game context.

use litera_core::command::Command;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Command to start (or resume) a session.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Client-generated session identifier.
    pub session_id: String,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "game.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Command to submit a player's choice in one of the modules.
#[derive(Debug, Clone)]
pub struct SubmitChoice {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The session making the choice.
    pub session_id: String,
    /// Module tag as sent by the client.
    pub module: String,
    /// Free-form action label.
    pub action_type: String,
    /// Module-specific choice data.
    pub payload: Map<String, Value>,
}

impl Command for SubmitChoice {
    fn command_type(&self) -> &'static str {
        "game.submit_choice"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }
}
