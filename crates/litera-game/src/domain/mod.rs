//! Domain model for the game context.

pub mod commands;
pub mod module;
pub mod outcome;
pub mod player;
pub mod resolver;
pub mod score;
