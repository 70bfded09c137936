//! Storage diagnostic endpoint.
//!
//! Always answers 200. Storage problems are reported in the body.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use litera_core::error::DomainError;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

const MAX_ERROR_CHARS: usize = 80;

/// Diagnostic report for GET /test.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    /// Backend status.
    pub backend: &'static str,
    /// Database status, or a truncated error.
    pub database: String,
    /// Whether `DATABASE_URL` is set. The URL itself is never echoed.
    pub database_url: &'static str,
    /// Name of the connected database.
    pub database_name: Option<String>,
    /// Connection status.
    pub connection_status: &'static str,
    /// Up to ten table names.
    pub collections: Vec<String>,
}

/// Truncates the underlying storage message, without the variant prefix.
fn error_summary(err: &DomainError) -> String {
    let message = match err {
        DomainError::Infrastructure(message) => message.clone(),
        other => other.to_string(),
    };
    message.chars().take(MAX_ERROR_CHARS).collect()
}

/// GET /test
async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let database_url = if std::env::var_os("DATABASE_URL").is_some() {
        "set"
    } else {
        "not set"
    };

    let response = match state.store.diagnostics().await {
        Ok(report) => DiagnosticsResponse {
            backend: "running",
            database: "connected".to_owned(),
            database_url,
            database_name: Some(report.database_name),
            connection_status: "connected",
            collections: report.collections,
        },
        Err(err) => {
            warn!(error = %err, "storage diagnostic failed");
            let message = error_summary(&err);
            DiagnosticsResponse {
                backend: "running",
                database: format!("error: {message}"),
                database_url,
                database_name: None,
                connection_status: "not connected",
                collections: Vec::new(),
            }
        }
    };

    Json(response)
}

/// Returns the diagnostics router.
pub fn router() -> Router<AppState> {
    Router::new().route("/test", get(diagnostics))
}
