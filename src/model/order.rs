use crate::model::LineItem;
use crate::util::{now_millis, now_rfc3339};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

/// An order placed at checkout.
///
/// `items` is a copy of the cart taken when the order was built; later cart
/// changes never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<LineItem>,
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: String,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl Order {
    /// Builds a pending order with a client-side id (`ord_<millis>`).
    ///
    /// # Arguments
    /// * `user_id` - Id of the resolved identity (may be a guest id)
    /// * `items` - Cart lines to snapshot
    pub fn new(user_id: impl Into<String>, items: Vec<LineItem>) -> Self {
        let total = items.iter().map(|i| i.total_price).sum();
        Self {
            id: format!("ord_{}", now_millis()),
            user_id: user_id.into(),
            items,
            total,
            status: OrderStatus::Pending,
            created_at: now_rfc3339(),
            payment_status: PaymentStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Product, Size};

    #[test]
    fn test_new_order_sums_lines() {
        let latte = Product::new("c1", "Latte", 4.0);
        let items = vec![
            LineItem::new(&latte, 2, Size::Medium, ["vanilla"]),
            LineItem::new(&latte, 1, Size::Small, Vec::<String>::new()),
        ];
        let order = Order::new("guest_1", items);

        assert!(order.id.starts_with("ord_"));
        assert_eq!(order.total, 15.5);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.created_at.ends_with('Z'));

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["userId"], "guest_1");
        assert_eq!(json["paymentStatus"], "pending");
    }
}
