//! API Module
//!
//! HTTP handlers, middleware and routing for the REST API.
//!
//! # Endpoints
//! - `GET /api/health`, `GET /api/readiness` - Liveness and readiness
//! - `POST /api/seed` - Insert random demo data
//! - `POST /api/auth/login`, `GET /api/auth/me` - Authentication
//! - `/api/organization`, `/api/user`, `/api/order` - CRUD with response caching
//! - `GET /api/cache/stats` - Cache statistics

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use middleware::{AuthUser, RequestMeta};
pub use rate_limit::OrgRateLimiter;
pub use routes::create_router;
pub use state::AppState;
