//! HTTP API layer for the employee portal.
//!
//! Provides REST endpoints for signup/login and employee record management.

mod extract;
pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
