//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod user_repository;

pub use user_repository::*;
