//! Domain types for the employee portal.
//!
//! This module contains the records exchanged over the API and persisted by storage.

mod coerce;
mod credential;
mod employee;

pub use credential::*;
pub use employee::*;
