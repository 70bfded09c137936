//! HTTP route handlers.

use axum::Router;

use crate::state::AppState;

pub mod diagnostics;
pub mod game;
pub mod players;
pub mod prebunking;
pub mod root;

/// Assembles every route under its public path.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(root::router())
        .merge(diagnostics::router())
        .nest("/api", game::router())
        .nest("/api/players", players::router())
        .nest("/api/prebunking", prebunking::router())
}
