//! Domain model for the content context.

pub mod catalog;
pub mod post;
