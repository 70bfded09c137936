//! Litera Store: `PostgreSQL` implementation of the session store.

pub mod pg_session_store;
pub mod schema;
