//! # Catalog Core
//!
//! Core types, errors, and utilities for the Course Catalog API.
//!
//! - [`errors`]: Application error type, error taxonomy and HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`validation`]: Ordered field checks run before any write
//!
//! # Example
//!
//! ```ignore
//! use catalog_core::errors::AppError;
//! use catalog_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found("Course not found");
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;
pub mod validation;

pub use errors::{AppError, ErrorBody, ErrorDetail, ErrorKind, ErrorMessage};
pub use password::{hash_password, verify_password};
pub use validation::{FieldRule, FieldValidation, collect_violations};
