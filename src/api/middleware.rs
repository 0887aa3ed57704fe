//! Request middleware
//!
//! - `request_logging`: assigns a request id, logs the request, echoes
//!   `x-request-id` and scopes [`RequestMeta`] for error bodies
//! - `auth_guard`: verifies the Bearer token and stores the caller
//! - `rate_limit`: per-organization request allowance

use std::collections::BTreeMap;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;
use uuid::Uuid;

use crate::api::rate_limit::RateDecision;
use crate::api::state::AppState;
use crate::error::ApiError;
use crate::models::User;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REDACTED_HEADERS: [&str; 4] = ["authorization", "cookie", "set-cookie", "proxy-authorization"];

/// Identity of the request being served, used to fill error bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    pub id: String,
    pub method: String,
    /// Path and query as received
    pub path: String,
}

tokio::task_local! {
    static REQUEST: RequestMeta;
}

/// Metadata of the current request, if running inside `request_logging`.
pub fn current_request() -> Option<RequestMeta> {
    REQUEST.try_with(Clone::clone).ok()
}

/// The authenticated caller, inserted into request extensions by `auth_guard`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Header map with credential-bearing values replaced.
pub fn sanitize_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if REDACTED_HEADERS.contains(&name.as_str()) {
                "[REDACTED]".to_string()
            } else {
                value.to_str().unwrap_or("[binary]").to_string()
            };
            (name.as_str().to_string(), value)
        })
        .collect()
}

pub async fn request_logging(request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let meta = RequestMeta {
        id: id.clone(),
        method: request.method().to_string(),
        path: request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| request.uri().path().to_string()),
    };

    debug!(
        request_id = %meta.id,
        method = %meta.method,
        path = %meta.path,
        query = request.uri().query().unwrap_or(""),
        headers = ?sanitize_headers(request.headers()),
        "HTTP request"
    );

    let mut response = REQUEST.scope(meta, next.run(request)).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

pub async fn auth_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.split_at_checked(7)?;
            scheme.eq_ignore_ascii_case("bearer ").then(|| token.trim())
        })
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

    let user = state.auth.verify_token(token)?;
    request.extensions_mut().insert(AuthUser(user));

    Ok(next.run(request).await)
}

/// Must run after `auth_guard`; requests without a caller are not counted.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(AuthUser(user)) = request.extensions().get::<AuthUser>().cloned() else {
        return Ok(next.run(request).await);
    };
    let key = user.organization_id.to_string();
    let limiter = &state.limiter;

    match limiter.check(&key) {
        RateDecision::Allowed {
            remaining,
            reset_after,
        } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(
                HeaderName::from_static("ratelimit-limit"),
                HeaderValue::from(limiter.max_requests()),
            );
            headers.insert(
                HeaderName::from_static("ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            headers.insert(
                HeaderName::from_static("ratelimit-reset"),
                HeaderValue::from(reset_after.as_secs()),
            );
            Ok(response)
        }
        RateDecision::Limited { retry_after } => {
            let window_secs = (limiter.window().as_millis() as f64 / 1000.0).round() as u64;
            debug!(organization_id = %key, "rate limit exceeded");

            let mut response = ApiError::RateLimited(format!(
                "Too many requests for organization {key}. Allowed {} per {window_secs}s",
                limiter.max_requests()
            ))
            .into_response();
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after.as_secs().max(1)),
            );
            Ok(response)
        }
    }
}
