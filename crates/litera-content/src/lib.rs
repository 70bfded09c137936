//! Litera: prebunking content catalog context.
//!
//! Responsible for loading, validating and versioning the seed posts shown
//! in the prebunking feed.

pub mod application;
pub mod domain;
