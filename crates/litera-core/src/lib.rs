//! Litera Core: shared domain abstractions.
//!
//! This crate defines the traits and record types that the game context,
//! the storage adapter, and the HTTP layer depend on. It contains no
//! infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod store;
