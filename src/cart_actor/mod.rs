//! Cart state logic and entity implementation.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::StateActor;
use crate::model::Cart;
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Creates a new Cart actor and its client, restoring the cart from `store`.
pub fn new(store: Arc<dyn KeyValueStore>) -> (StateActor<Cart>, CartClient) {
    let (actor, generic_client) = StateActor::new(32, store);
    let client = CartClient::new(generic_client);

    (actor, client)
}
