//! Storage layer for the employee portal.
//!
//! Provides database access via SQLx with SQLite.

mod models;
mod pool;
mod repository;

#[cfg(test)]
pub use pool::connect_in_memory;
pub use pool::connect_with_retry;
pub use repository::PortalRepository;
