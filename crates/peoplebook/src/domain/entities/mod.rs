//! Domain Entities
//!
//! - User: An account that authenticates with email + API key

mod user;

pub use user::*;
