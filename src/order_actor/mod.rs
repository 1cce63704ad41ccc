//! Order history logic and entity implementation.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::clients::OrderHistoryClient;
use crate::framework::StateActor;
use crate::model::Order;
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// The only mutation the history accepts.
#[derive(Debug, Clone)]
pub enum OrderAction {
    Append(Order),
}

/// Creates a new Order History actor and its client, restoring from `store`.
pub fn new(store: Arc<dyn KeyValueStore>) -> (StateActor<OrderHistory>, OrderHistoryClient) {
    let (actor, generic_client) = StateActor::new(32, store);
    let client = OrderHistoryClient::new(generic_client);

    (actor, client)
}
