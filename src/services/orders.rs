//! Order service

use uuid::Uuid;

use super::validation::Validator;
use crate::error::{ApiError, Result};
use crate::models::order::{NewOrder, OrderChanges, OrderFilter};
use crate::models::{Order, OrderDetail, OrderPayload, Page, PaginationParams};
use crate::repository::Database;

pub(crate) fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Order {id} not found"))
}

/// Unparseable filter ids match nothing rather than everything.
pub async fn list(
    db: &Database,
    params: PaginationParams,
    user_id: Option<&str>,
    organization_id: Option<&str>,
) -> Page<Order> {
    let parse = |raw: Option<&str>| -> std::result::Result<Option<Uuid>, ()> {
        match raw.filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(s) => Uuid::parse_str(s).map(Some).map_err(|_| ()),
        }
    };
    match (parse(user_id), parse(organization_id)) {
        (Ok(user_id), Ok(organization_id)) => {
            db.list_orders(
                params,
                &OrderFilter {
                    user_id,
                    organization_id,
                },
            )
            .await
        }
        _ => Page::paginate(Vec::new(), params),
    }
}

pub async fn get(db: &Database, id: &str) -> Result<OrderDetail> {
    let uuid = Uuid::parse_str(id).map_err(|_| not_found(id))?;
    db.get_order_detail(uuid).await.ok_or_else(|| not_found(id))
}

async fn check_references(
    db: &Database,
    v: &mut Validator,
    user_id: Option<Uuid>,
    organization_id: Option<Uuid>,
) {
    if let Some(id) = user_id {
        if db.get_user(id).await.is_none() {
            v.push("userId", format!("user {id} does not exist"));
        }
    }
    if let Some(id) = organization_id {
        if db.get_organization(id).await.is_none() {
            v.push("organizationId", format!("organization {id} does not exist"));
        }
    }
}

pub async fn create(db: &Database, payload: OrderPayload) -> Result<Order> {
    let mut v = Validator::new();
    let order_date = v.required_past_date("orderDate", payload.order_date.as_deref());
    let total_amount = match &payload.total_amount {
        Some(value) => v.positive_amount("totalAmount", value),
        None => {
            v.push("totalAmount", super::validation::REQUIRED);
            None
        }
    };
    let user_id = v.required_id("userId", payload.user_id.as_deref());
    let organization_id = v.required_id("organizationId", payload.organization_id.as_deref());
    check_references(db, &mut v, user_id, organization_id).await;
    v.finish()?;

    let (Some(order_date), Some(total_amount), Some(user_id), Some(organization_id)) =
        (order_date, total_amount, user_id, organization_id)
    else {
        return Err(ApiError::Internal("validated order fields missing".into()));
    };
    Ok(db
        .create_order(NewOrder {
            order_date,
            total_amount,
            user_id,
            organization_id,
        })
        .await)
}

pub async fn update(db: &Database, id: &str, payload: OrderPayload) -> Result<Order> {
    let mut v = Validator::new();
    let order_date = payload
        .order_date
        .as_deref()
        .and_then(|raw| v.past_date("orderDate", raw));
    let total_amount = payload
        .total_amount
        .as_ref()
        .and_then(|value| v.positive_amount("totalAmount", value));
    let user_id = v.optional_id("userId", payload.user_id.as_deref());
    let organization_id = v.optional_id("organizationId", payload.organization_id.as_deref());
    check_references(db, &mut v, user_id, organization_id).await;
    v.finish()?;

    let uuid = Uuid::parse_str(id).map_err(|_| not_found(id))?;
    db.update_order(
        uuid,
        OrderChanges {
            order_date,
            total_amount,
            user_id,
            organization_id,
        },
    )
    .await
    .ok_or_else(|| not_found(id))
}

pub async fn remove(db: &Database, id: &str) {
    if let Ok(uuid) = Uuid::parse_str(id) {
        db.delete_order(uuid).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrganizationPayload, UserPayload};
    use crate::services::{organizations, users};
    use serde_json::json;

    async fn owner(db: &Database) -> (String, String) {
        let org = organizations::create(
            db,
            OrganizationPayload {
                name: Some("Acme".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let user = users::create(
            db,
            UserPayload {
                first_name: Some("Alex".into()),
                last_name: Some("Smith".into()),
                email: Some("alex@acme.io".into()),
                date_created: None,
                organization_id: Some(org.id.to_string()),
            },
        )
        .await
        .unwrap();
        (user.id.to_string(), org.id.to_string())
    }

    fn payload(user: &str, org: &str, amount: serde_json::Value) -> OrderPayload {
        OrderPayload {
            order_date: Some("2024-03-01T12:00:00Z".into()),
            total_amount: Some(amount),
            user_id: Some(user.into()),
            organization_id: Some(org.into()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_detail() {
        let db = Database::new();
        let (user, org) = owner(&db).await;
        let order = create(&db, payload(&user, &org, json!("19.99"))).await.unwrap();
        assert_eq!(order.total_amount, 19.99);

        let detail = get(&db, &order.id.to_string()).await.unwrap();
        assert_eq!(detail.user.unwrap().id.to_string(), user);
        assert_eq!(detail.organization.unwrap().id.to_string(), org);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_amount_and_future_date() {
        let db = Database::new();
        let (user, org) = owner(&db).await;
        let mut input = payload(&user, &org, json!(0));
        input.order_date = Some("2999-01-01".into());

        let err = create(&db, input).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "orderDate: date must be in the past; totalAmount: must be greater than 0"
        );
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let db = Database::new();
        let err = create(&db, OrderPayload::default()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "orderDate: value is required; totalAmount: value is required; \
             userId: value is required; organizationId: value is required"
        );
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = Database::new();
        let (user, org) = owner(&db).await;
        create(&db, payload(&user, &org, json!(5))).await.unwrap();

        let params = PaginationParams::default();
        assert_eq!(list(&db, params, Some(&user), None).await.total, 1);
        assert_eq!(list(&db, params, None, Some(&org)).await.total, 1);
        let other = Uuid::new_v4().to_string();
        assert_eq!(list(&db, params, Some(&other), None).await.total, 0);
        assert_eq!(list(&db, params, Some("junk"), None).await.total, 0);
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let db = Database::new();
        assert_eq!(
            get(&db, "missing").await.unwrap_err().to_string(),
            "Order missing not found"
        );
    }
}
