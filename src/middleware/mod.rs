//! Middleware and extractors for cross-cutting request concerns.
//!
//! - [`auth`]: HTTP Basic authentication (`AuthUser` extractor)
//! - [`errors`]: the global error-logging stage and panic recovery
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Basic base64(email:password)`
//! 2. `AuthUser` decodes the credentials and loads the user by email
//! 3. The password is checked against the stored bcrypt hash
//! 4. The handler runs with the resolved identity, or the request ends with 401

pub mod auth;
pub mod errors;
