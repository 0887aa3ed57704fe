use tracing::info;
use uuid::Uuid;

use super::Database;
use crate::models::order::{NewOrder, OrderChanges, OrderFilter};
use crate::models::{Order, OrderDetail, Page, PaginationParams};

impl Database {
    pub async fn get_order(&self, id: Uuid) -> Option<Order> {
        self.tables.read().await.orders.get(&id).cloned()
    }

    /// The order with its user and organization joined in.
    pub async fn get_order_detail(&self, id: Uuid) -> Option<OrderDetail> {
        let tables = self.tables.read().await;
        let order = tables.orders.get(&id)?.clone();
        let user = tables.users.get(&order.user_id).cloned();
        let organization = tables.organizations.get(&order.organization_id).cloned();

        Some(OrderDetail {
            order,
            user,
            organization,
        })
    }

    /// Orders matching `filter`, newest first.
    pub async fn list_orders(&self, params: PaginationParams, filter: &OrderFilter) -> Page<Order> {
        let mut rows: Vec<Order> = self
            .tables
            .read()
            .await
            .orders
            .values()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(a.id.cmp(&b.id)));
        Page::paginate(rows, params)
    }

    pub async fn create_order(&self, input: NewOrder) -> Order {
        let order = Order {
            id: Uuid::new_v4(),
            order_date: input.order_date,
            total_amount: input.total_amount,
            user_id: input.user_id,
            organization_id: input.organization_id,
        };

        self.tables.write().await.orders.insert(order.id, order.clone());

        info!(
            id = %order.id,
            user_id = %order.user_id,
            organization_id = %order.organization_id,
            total_amount = order.total_amount,
            "Order created"
        );
        order
    }

    pub async fn update_order(&self, id: Uuid, changes: OrderChanges) -> Option<Order> {
        let mut tables = self.tables.write().await;
        let order = tables.orders.get_mut(&id)?;
        order.apply(changes);

        info!(id = %id, "Order updated");
        Some(order.clone())
    }

    pub async fn delete_order(&self, id: Uuid) -> bool {
        let removed = self.tables.write().await.orders.remove(&id).is_some();
        info!(id = %id, removed, "Order deleted");
        removed
    }
}
