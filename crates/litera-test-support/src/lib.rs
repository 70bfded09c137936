//! Shared test doubles and utilities for the Litera game backend.

mod clock;
mod store;

pub use clock::FixedClock;
pub use store::{ContendedSessionStore, FailingSessionStore, InMemorySessionStore};
