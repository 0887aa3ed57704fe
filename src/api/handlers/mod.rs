//! API Handlers
//!
//! One module per resource. Reads go through the response cache; writes go
//! to the service layer and then invalidate the entity's cached entries.

pub mod auth;
pub mod cache;
pub mod health;
pub mod orders;
pub mod organizations;
pub mod seed;
pub mod users;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}

/// Serializes a DTO into the value stored in the cache.
pub(crate) fn to_body<T: Serialize>(dto: &T) -> Result<Value> {
    serde_json::to_value(dto).map_err(|e| ApiError::Internal(format!("serialize response: {e}")))
}
