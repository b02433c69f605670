//! API Key Credential Parsing
//!
//! Pure functions that turn an `Authorization: Apikey <credentials>` header
//! value into a [`Credential`] (email + API key).
//!
//! Three credential encodings are accepted:
//!
//! - Field form: `email="a@b.com", key="secret"`
//! - Colon form: `a@b.com:secret`
//! - Base64 of the colon form
//!
//! No I/O happens here; user lookup and secret verification are done by the
//! server's middleware through [`crate::ports::UserRepository`].

mod colon;
mod credentials;
mod errors;
mod fields;
mod header;

pub use colon::split_colon;
pub use credentials::{resolve_credentials, Credential, EMAIL_FIELD, KEY_FIELD};
pub use errors::AuthError;
pub use fields::{split_fields, FieldMap};
pub use header::{split_auth_header, ParsedHeader, APIKEY_SCHEME};
