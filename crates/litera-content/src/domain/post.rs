//! Prebunking feed posts.

use serde::{Deserialize, Serialize};

/// Ground-truth classification of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostLabel {
    /// Accurate content.
    Verified,
    /// True facts in a misleading frame.
    Misleading,
    /// Fabricated content.
    Hoax,
}

/// A seed post for the prebunking feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrebunkingPost {
    /// Stable post identifier.
    pub post_id: String,
    /// Post text as shown in the feed.
    pub content: String,
    /// Account or outlet the post appears to come from.
    pub source: String,
    /// Manipulation technique, e.g. `emotion` or `false context`.
    pub technique: String,
    /// Ground truth the player's classification is scored against.
    pub label: PostLabel,
    /// Hints revealed after the player answers.
    #[serde(default)]
    pub hints: Vec<String>,
}
