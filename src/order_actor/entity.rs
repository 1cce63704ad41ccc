//! The local order log and its [`StoreEntity`] implementation.

use super::{OrderAction, OrderError};
use crate::framework::StoreEntity;
use crate::model::Order;
use crate::storage::keys;
use serde::{Deserialize, Serialize};

/// Every order placed from this device, oldest first.
///
/// Serializes as a bare JSON array under [`keys::ORDERS`]. Entries are never
/// edited or removed. Ids are not required to be unique: two fallback orders
/// created in the same millisecond share an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }
}

impl StoreEntity for OrderHistory {
    const STORAGE_KEY: &'static str = keys::ORDERS;
    type Action = OrderAction;
    type ActionResult = usize;
    type Error = OrderError;

    /// Returns the new length of the history.
    fn handle_action(&mut self, action: OrderAction) -> Result<usize, OrderError> {
        match action {
            OrderAction::Append(order) => {
                self.orders.push(order);
                Ok(self.orders.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut history = OrderHistory::default();
        let first = Order::new("guest_1", Vec::new());
        let mut second = Order::new("guest_2", Vec::new());
        second.id = "srv_42".to_string();

        assert_eq!(history.handle_action(OrderAction::Append(first.clone())), Ok(1));
        assert_eq!(history.handle_action(OrderAction::Append(second)), Ok(2));
        assert_eq!(history.orders()[0], first);
        assert_eq!(history.find("srv_42").unwrap().user_id, "guest_2");
    }
}
