//! The prebunking post catalog.

use std::collections::HashSet;

use litera_core::error::DomainError;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::post::PrebunkingPost;

/// Catalog shipped with the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../catalog/prebunking_posts.yaml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    posts: Vec<PrebunkingPost>,
}

/// Validated, immutable set of prebunking posts.
#[derive(Debug, Clone)]
pub struct PostCatalog {
    posts: Vec<PrebunkingPost>,
    version_hash: String,
}

impl PostCatalog {
    /// Parses and validates a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the YAML is malformed, a label
    /// is unknown, or a post id is empty or duplicated.
    pub fn from_yaml(source: &str) -> Result<Self, DomainError> {
        let file: CatalogFile = serde_yaml::from_str(source)
            .map_err(|e| DomainError::Validation(format!("invalid catalog: {e}")))?;

        let mut seen = HashSet::new();
        for post in &file.posts {
            if post.post_id.trim().is_empty() {
                return Err(DomainError::Validation(
                    "catalog post has an empty post_id".to_owned(),
                ));
            }
            if !seen.insert(post.post_id.as_str()) {
                return Err(DomainError::Validation(format!(
                    "duplicate post_id in catalog: {}",
                    post.post_id
                )));
            }
        }

        Ok(Self {
            posts: file.posts,
            version_hash: format!("{:x}", Sha256::digest(source.as_bytes())),
        })
    }

    /// Loads the catalog shipped with the binary.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the bundled file is invalid.
    pub fn bundled() -> Result<Self, DomainError> {
        Self::from_yaml(BUNDLED_CATALOG)
    }

    /// All posts, in file order.
    #[must_use]
    pub fn posts(&self) -> &[PrebunkingPost] {
        &self.posts
    }

    /// Looks up a post by id.
    #[must_use]
    pub fn get(&self, post_id: &str) -> Option<&PrebunkingPost> {
        self.posts.iter().find(|post| post.post_id == post_id)
    }

    /// SHA-256 of the catalog source, hex encoded.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::PostLabel;

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = PostCatalog::bundled().unwrap();

        assert!(!catalog.posts().is_empty());
        assert_eq!(catalog.version_hash().len(), 64);
        for label in [PostLabel::Verified, PostLabel::Misleading, PostLabel::Hoax] {
            assert!(
                catalog.posts().iter().any(|p| p.label == label),
                "bundled catalog has no {label:?} post"
            );
        }
    }

    #[test]
    fn test_hints_default_to_empty() {
        let catalog = PostCatalog::from_yaml(
            "posts:\n  - post_id: a\n    content: c\n    source: s\n    technique: t\n    label: hoax\n",
        )
        .unwrap();

        assert!(catalog.get("a").unwrap().hints.is_empty());
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let result = PostCatalog::from_yaml(
            "posts:\n  - post_id: a\n    content: c\n    source: s\n    technique: t\n    label: satire\n",
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_duplicate_post_id_is_rejected() {
        let post = "  - post_id: a\n    content: c\n    source: s\n    technique: t\n    label: hoax\n";
        let result = PostCatalog::from_yaml(&format!("posts:\n{post}{post}"));

        match result {
            Err(DomainError::Validation(message)) => assert!(message.contains("duplicate")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_post_id_is_rejected() {
        let result = PostCatalog::from_yaml(
            "posts:\n  - post_id: \" \"\n    content: c\n    source: s\n    technique: t\n    label: hoax\n",
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_version_hash_tracks_source_text() {
        let a = PostCatalog::from_yaml("posts: []\n").unwrap();
        let b = PostCatalog::from_yaml("posts: []\n# edited\n").unwrap();

        assert_ne!(a.version_hash(), b.version_hash());
    }
}
