//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{self, auth, cache, health, orders, organizations, seed, users};
use super::middleware::{auth_guard, rate_limit, request_logging};
use super::state::AppState;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Request logging: request id, sanitized header log, error metadata
/// - CORS: Allows any origin
/// - Tracing: tower-http request spans
/// - Protected routes: auth guard, then per-organization rate limit
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let open = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/readiness", get(health::readiness))
        .route("/api/seed", post(seed::seed))
        .route("/api/auth/login", post(auth::login));

    // route_layer keeps unmatched paths out of the guard so they reach the fallback.
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/organization",
            get(organizations::list).post(organizations::create),
        )
        .route(
            "/api/organization/:id",
            get(organizations::get)
                .put(organizations::update)
                .delete(organizations::delete),
        )
        .route("/api/user", get(users::list).post(users::create))
        .route(
            "/api/user/:id",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/api/order", get(orders::list).post(orders::create))
        .route(
            "/api/order/:id",
            get(orders::get).put(orders::update).delete(orders::delete),
        )
        .route("/api/cache/stats", get(cache::stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    Router::new()
        .merge(open)
        .merge(protected)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(request_logging))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
