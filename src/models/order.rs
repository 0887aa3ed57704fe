//! Order entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Organization, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_amount: f64,
    pub user_id: Uuid,
    pub organization_id: Uuid,
}

/// An order with its user and organization joined in, when they still exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_date: DateTime<Utc>,
    pub total_amount: f64,
    pub user_id: Uuid,
    pub organization_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub order_date: Option<DateTime<Utc>>,
    pub total_amount: Option<f64>,
    pub user_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
}

/// Optional filters for order listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub user_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.user_id.map_or(true, |id| order.user_id == id)
            && self
                .organization_id
                .map_or(true, |id| order.organization_id == id)
    }
}

impl Order {
    pub fn apply(&mut self, changes: OrderChanges) {
        if let Some(order_date) = changes.order_date {
            self.order_date = order_date;
        }
        if let Some(total_amount) = changes.total_amount {
            self.total_amount = total_amount;
        }
        if let Some(user_id) = changes.user_id {
            self.user_id = user_id;
        }
        if let Some(organization_id) = changes.organization_id {
            self.organization_id = organization_id;
        }
    }
}
