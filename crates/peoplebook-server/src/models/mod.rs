//! Peoplebook API Data Models

mod user;

pub use user::*;
