//! Routes for the prebunking feed.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use litera_content::application::query_handlers::{self, PostListView};
use litera_content::domain::post::PrebunkingPost;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /posts
async fn list_posts(State(state): State<AppState>) -> Json<PostListView> {
    Json(query_handlers::list_posts(&state.catalog))
}

/// GET /posts/{post_id}
#[instrument(skip(state))]
async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<PrebunkingPost>, ApiError> {
    let post = query_handlers::get_post(&state.catalog, &post_id)?;
    Ok(Json(post))
}

/// Returns the router for the prebunking feed.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{post_id}", get(get_post))
}
