//! Litera: player progression and choice resolution context.
//!
//! Responsible for session start-up, the per-module scoring rules, and
//! recording every resolved choice in the action log.

pub mod application;
pub mod domain;
