//! Application services for the content context.

pub mod query_handlers;
