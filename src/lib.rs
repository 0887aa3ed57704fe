//! tenant_orders - Multi-tenant organizations, users and orders over REST
//!
//! JWT-authenticated CRUD with a bounded TTL/LRU response cache, ETag
//! revalidation, invalidation on write and per-organization rate limiting.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
