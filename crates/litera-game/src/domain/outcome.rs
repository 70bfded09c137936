//! Outcome of a resolved choice, as shown to the player.

use std::collections::BTreeMap;

use serde::Serialize;

/// Message used when a payload does not match any rule of its module.
pub const NO_EFFECT_MESSAGE: &str = "No effect";

/// The signed deltas a rule applied before clamping.
///
/// Only the stats the rule touched are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delta {
    /// Change to public trust.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_trust: Option<i32>,
    /// Change to personal clout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_clout: Option<i32>,
    /// Change to professional skill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_skill: Option<i32>,
    /// Change per character affinity.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, i32>,
}

/// What happened and by how much.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Human-readable feedback.
    pub message: String,
    /// Deltas applied; absent for no-op outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
}

impl Outcome {
    /// Outcome for a choice that changed nothing.
    #[must_use]
    pub fn no_effect() -> Self {
        Self {
            message: NO_EFFECT_MESSAGE.to_owned(),
            delta: None,
        }
    }

    /// Returns `true` if the outcome carries no delta.
    #[must_use]
    pub fn is_no_effect(&self) -> bool {
        self.delta.is_none()
    }

    /// Serializes the outcome for the action log.
    ///
    /// # Panics
    ///
    /// Never in practice: the type only holds strings, integers and maps
    /// with string keys.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("Outcome serialization is infallible")
    }
}
