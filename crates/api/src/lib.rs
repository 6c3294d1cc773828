//! Vigie API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! rule-catalog cache) so integration tests and the binary entrypoint can
//! both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod rules_cache;
pub mod state;
