//! Response DTOs for the REST API

use serde::Serialize;
use uuid::Uuid;

use crate::api::middleware::RequestMeta;
use crate::cache::CacheStats;
use crate::models::User;

/// Response body for GET /api/health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Response body for GET /api/readiness
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub db: String,
}

impl ReadinessResponse {
    pub fn ready() -> Self {
        Self {
            status: "ready".to_string(),
            db: "ok".to_string(),
        }
    }
}

/// Response body for POST /api/auth/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Response body for GET /api/auth/me
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user: User,
}

/// Per-organization line of the seed summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeededOrganization {
    pub name: String,
    pub user_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeededUser {
    pub id: Uuid,
    pub email: String,
}

/// Response body for POST /api/seed
#[derive(Debug, Clone, Serialize)]
pub struct SeedResponse {
    pub organizations: Vec<SeededOrganization>,
    pub users: Vec<SeededUser>,
    pub orders: Vec<Uuid>,
}

/// Response body for GET /api/cache/stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: Option<String>,
    /// RFC 3339 timestamp
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ErrorResponse {
    /// Builds the body, filling request metadata when the error happened
    /// inside a logged request.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        request: Option<&RequestMeta>,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
            request_id: request.map(|r| r.id.clone()),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            path: request.map(|r| r.path.clone()),
            method: request.map(|r| r.method.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }

    #[test]
    fn test_readiness_response_serialize() {
        let json = serde_json::to_value(ReadinessResponse::ready()).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["db"], "ok");
    }

    #[test]
    fn test_cache_stats_response_includes_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            total_entries: 2,
            ..CacheStats::default()
        };
        let json = serde_json::to_value(CacheStatsResponse::from(stats)).unwrap();
        assert_eq!(json["hitRate"], 0.75);
        assert_eq!(json["totalEntries"], 2);
        assert_eq!(json["invalidations"], 0);
    }

    #[test]
    fn test_error_response_with_request_meta() {
        let meta = RequestMeta {
            id: "req-123".to_string(),
            method: "GET".to_string(),
            path: "/api/x".to_string(),
        };
        let json = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "gone", Some(&meta))).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "gone");
        assert_eq!(json["requestId"], "req-123");
        assert_eq!(json["path"], "/api/x");
        assert_eq!(json["method"], "GET");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_error_response_without_request_meta() {
        let json = serde_json::to_value(ErrorResponse::new("INTERNAL_SERVER_ERROR", "x", None)).unwrap();
        assert!(json["requestId"].is_null());
        assert!(json.get("path").is_none());
    }
}
