//! Services Module
//!
//! Business rules between the HTTP handlers and the repository: input
//! validation, reference checks, not-found mapping and authentication.

pub mod auth;
pub mod orders;
pub mod organizations;
pub mod seed;
pub mod users;
pub mod validation;

pub use auth::{Authenticator, Claims};
pub use validation::Validator;
