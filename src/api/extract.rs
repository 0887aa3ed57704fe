//! Request extraction helpers

use axum::http::{header, HeaderMap};
use serde::Deserialize;

use crate::models::PaginationParams;

/// Raw `If-None-Match` value, compared byte-for-byte against the ETag.
pub fn if_none_match(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
}

/// Numbers that do not parse are treated as absent.
fn parse_number(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse().ok())
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|s| !s.is_empty())
}

/// `?page&limit` on list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: parse_number(self.page.as_deref()),
            limit: parse_number(self.limit.as_deref()),
        }
    }

    /// Parameters that make up the list cache key.
    pub fn key_params(&self) -> Vec<(&'static str, Option<String>)> {
        let params = self.pagination();
        vec![
            ("page", params.page.map(|p| p.to_string())),
            ("limit", params.limit.map(|l| l.to_string())),
        ]
    }
}

/// `?page&limit&userId&organizationId` on the order list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub user_id: Option<String>,
    pub organization_id: Option<String>,
}

impl OrderListQuery {
    fn list_query(&self) -> ListQuery {
        ListQuery {
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
    }

    pub fn pagination(&self) -> PaginationParams {
        self.list_query().pagination()
    }

    pub fn user_id(&self) -> Option<&str> {
        non_empty(&self.user_id)
    }

    pub fn organization_id(&self) -> Option<&str> {
        non_empty(&self.organization_id)
    }

    pub fn key_params(&self) -> Vec<(&'static str, Option<String>)> {
        let mut params = self.list_query().key_params();
        params.push(("userId", self.user_id().map(str::to_string)));
        params.push(("organizationId", self.organization_id().map(str::to_string)));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{list_key, Entity};
    use axum::http::HeaderValue;

    #[test]
    fn test_if_none_match() {
        let mut headers = HeaderMap::new();
        assert_eq!(if_none_match(&headers), None);

        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"abc\""));
        assert_eq!(if_none_match(&headers), Some("\"abc\""));
    }

    #[test]
    fn test_garbage_numbers_are_absent() {
        let query = ListQuery {
            page: Some("two".into()),
            limit: Some("10".into()),
        };
        assert_eq!(
            query.pagination(),
            PaginationParams {
                page: None,
                limit: Some(10),
            }
        );
        assert_eq!(list_key(Entity::User, query.key_params()), "user:list:limit=10");
    }

    #[test]
    fn test_order_key_params_drop_empty_filters() {
        let query = OrderListQuery {
            page: Some("1".into()),
            limit: None,
            user_id: Some(String::new()),
            organization_id: Some("org-1".into()),
        };
        assert_eq!(query.user_id(), None);
        assert_eq!(
            list_key(Entity::Order, query.key_params()),
            "order:list:organizationId=org-1&page=1"
        );
    }
}
