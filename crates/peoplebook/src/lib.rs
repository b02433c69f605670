//! Peoplebook Domain Library
//!
//! Core domain types and interfaces for the Peoplebook API.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and errors
//!   - `entities/`: Core domain models (User)
//!   - `errors/`: Domain-specific error types
//!
//! - **Auth** (`auth/`): `Authorization: Apikey ...` credential parsing
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!
//! # Usage
//!
//! ```rust
//! use peoplebook::auth::{split_auth_header, Credential};
//!
//! let header = split_auth_header("Apikey test@example.com:abcdefg").unwrap();
//! assert!(header.is_apikey());
//!
//! let credential = Credential::resolve(&header.credentials).unwrap();
//! assert_eq!(credential.identity, "test@example.com");
//! assert_eq!(credential.secret, "abcdefg");
//! ```

pub mod auth;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use auth::{AuthError, Credential};
pub use domain::{DomainError, User};
pub use ports::UserRepository;
