//! Conditional responses
//!
//! Decides between a full body and `304 Not Modified` from the client's
//! `If-None-Match` value, and builds publicly cacheable responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::cache::etag::digest;

// == Revalidation ==
/// Terminal outcome of a conditional request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revalidation {
    SendFull,
    SendNotModified,
}

impl Revalidation {
    /// `SendNotModified` only when the header is present and byte-equal to
    /// `etag`, quotes included.
    pub fn evaluate(if_none_match: Option<&str>, etag: &str) -> Self {
        match if_none_match {
            Some(candidate) if candidate == etag => Revalidation::SendNotModified,
            _ => Revalidation::SendFull,
        }
    }
}

// == Conditional Response ==
/// Response carrying an `ETag`, with or without a body.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalResponse {
    pub status: StatusCode,
    pub etag: String,
    /// None for `304 Not Modified`
    pub body: Option<Value>,
}

impl ConditionalResponse {
    /// Resolves a request against a body whose digest is `etag`.
    pub fn resolve(
        if_none_match: Option<&str>,
        etag: String,
        body: Value,
        success: StatusCode,
    ) -> Self {
        match Revalidation::evaluate(if_none_match, &etag) {
            Revalidation::SendNotModified => Self {
                status: StatusCode::NOT_MODIFIED,
                etag,
                body: None,
            },
            Revalidation::SendFull => Self {
                status: success,
                etag,
                body: Some(body),
            },
        }
    }

    pub fn is_not_modified(&self) -> bool {
        self.status == StatusCode::NOT_MODIFIED
    }
}

impl IntoResponse for ConditionalResponse {
    fn into_response(self) -> Response {
        let mut response = match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        };

        if let Ok(value) = HeaderValue::from_str(&self.etag) {
            response.headers_mut().insert(header::ETAG, value);
        }
        response
    }
}

/// Computes the body digest and resolves the request with a 200 on the full path.
pub fn respond_cached_or_fresh(if_none_match: Option<&str>, body: Value) -> ConditionalResponse {
    respond_with_status(if_none_match, body, StatusCode::OK)
}

/// Like [`respond_cached_or_fresh`] with a different success status.
pub fn respond_with_status(
    if_none_match: Option<&str>,
    body: Value,
    success: StatusCode,
) -> ConditionalResponse {
    let etag = digest(&body);
    ConditionalResponse::resolve(if_none_match, etag, body, success)
}

// == Public Cache-Control ==
/// Full body response marked `Cache-Control: public, max-age=<seconds>`.
#[derive(Debug, Clone)]
pub struct PublicCached {
    pub body: Value,
    pub max_age: u64,
}

impl PublicCached {
    pub fn new(body: Value, max_age: u64) -> Self {
        Self { body, max_age }
    }
}

impl IntoResponse for PublicCached {
    fn into_response(self) -> Response {
        let cache_control = format!("public, max-age={}", self.max_age);
        let mut response = Json(self.body).into_response();
        if let Ok(value) = HeaderValue::from_str(&cache_control) {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_evaluate_transitions() {
        assert_eq!(
            Revalidation::evaluate(None, "\"etag123\""),
            Revalidation::SendFull
        );
        assert_eq!(
            Revalidation::evaluate(Some("\"etag123\""), "\"etag123\""),
            Revalidation::SendNotModified
        );
        assert_eq!(
            Revalidation::evaluate(Some("\"other\""), "\"etag123\""),
            Revalidation::SendFull
        );
        // quotes are part of the comparison
        assert_eq!(
            Revalidation::evaluate(Some("etag123"), "\"etag123\""),
            Revalidation::SendFull
        );
        assert_eq!(
            Revalidation::evaluate(Some(""), "\"etag123\""),
            Revalidation::SendFull
        );
    }

    #[test]
    fn test_resolve_without_header_sends_full_body() {
        let response = ConditionalResponse::resolve(
            None,
            "\"etag123\"".to_string(),
            json!({"id": "1"}),
            StatusCode::OK,
        );
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.etag, "\"etag123\"");
        assert_eq!(response.body, Some(json!({"id": "1"})));
    }

    #[test]
    fn test_resolve_matching_header_sends_not_modified() {
        let response = ConditionalResponse::resolve(
            Some("\"etag123\""),
            "\"etag123\"".to_string(),
            json!({"id": "1"}),
            StatusCode::OK,
        );
        assert!(response.is_not_modified());
        assert_eq!(response.etag, "\"etag123\"");
        assert_eq!(response.body, None);
    }

    #[test]
    fn test_respond_with_status_keeps_success_code() {
        let response = respond_with_status(None, json!({"id": "1"}), StatusCode::CREATED);
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.etag, digest(&json!({"id": "1"})));
    }

    #[tokio::test]
    async fn test_not_modified_http_response_has_etag_and_empty_body() {
        let body = json!({"id": "1"});
        let etag = digest(&body);
        let response = respond_cached_or_fresh(Some(&etag), body).into_response();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(response.headers()[header::ETAG], etag.as_str());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_full_http_response_has_etag_and_body() {
        let body = json!({"id": "1"});
        let response = respond_cached_or_fresh(None, body.clone()).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ETAG], digest(&body).as_str());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, body);
    }

    #[test]
    fn test_public_cached_sets_cache_control() {
        let response = PublicCached::new(json!([]), 600).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=600"
        );
    }
}
