//! Litera API: HTTP surface of the Litera game backend.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
