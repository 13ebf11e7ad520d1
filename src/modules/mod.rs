//! Feature modules.
//!
//! Each module follows the same layout:
//!
//! - `model.rs`: rows, DTOs, response views and field rules
//! - `service.rs`: SQL and persistence rules
//! - `controller.rs`: HTTP handlers
//! - `router.rs`: route table

pub mod courses;
pub mod users;
