//! Request and Response models for the REST API
//!
//! Entities double as their JSON representation (camelCase fields, RFC 3339
//! dates); request bodies are kept loose so validation can report every
//! problem at once.

pub mod order;
pub mod organization;
pub mod pagination;
pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use order::{Order, OrderDetail};
pub use organization::Organization;
pub use pagination::{Page, PaginationParams};
pub use requests::{LoginRequest, OrderPayload, OrganizationPayload, UserPayload};
pub use responses::{
    CacheStatsResponse, ErrorResponse, HealthResponse, LoginResponse, MeResponse,
    ReadinessResponse, SeedResponse,
};
pub use user::User;
