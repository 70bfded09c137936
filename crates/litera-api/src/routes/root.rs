//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response.
#[derive(Serialize)]
pub struct RootResponse {
    /// Fixed banner.
    pub message: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// GET /
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Litera backend running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Returns the liveness router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use litera_content::domain::catalog::PostCatalog;
    use litera_test_support::{FailingSessionStore, FixedClock};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_root_answers_even_when_store_is_down() {
        // Arrange
        let state = AppState::new(
            Arc::new(FailingSessionStore),
            Arc::new(FixedClock(Utc::now())),
            Arc::new(PostCatalog::bundled().unwrap()),
        );
        let app = router().with_state(state);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(json["message"], "Litera backend running");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
