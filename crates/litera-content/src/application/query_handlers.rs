//! Query handlers for the content context.

use litera_core::error::DomainError;
use serde::Serialize;

use crate::domain::catalog::PostCatalog;
use crate::domain::post::PrebunkingPost;

/// Read-only view of the whole feed.
#[derive(Debug, Clone, Serialize)]
pub struct PostListView {
    /// Catalog version hash.
    pub version_hash: String,
    /// Posts in feed order.
    pub posts: Vec<PrebunkingPost>,
}

/// Lists every post in the catalog.
#[must_use]
pub fn list_posts(catalog: &PostCatalog) -> PostListView {
    PostListView {
        version_hash: catalog.version_hash().to_owned(),
        posts: catalog.posts().to_vec(),
    }
}

/// Retrieves one post by id.
///
/// # Errors
///
/// Returns `DomainError::PostNotFound` if the catalog has no such post.
pub fn get_post(catalog: &PostCatalog, post_id: &str) -> Result<PrebunkingPost, DomainError> {
    catalog
        .get(post_id)
        .cloned()
        .ok_or_else(|| DomainError::PostNotFound(post_id.to_owned()))
}
