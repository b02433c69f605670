//! Peoplebook API Routes
//!
//! - /api/user - The authenticated user (requires `Authorization: Apikey ...`)

pub mod swagger;
pub mod user;
