//! [`StoreEntity`] implementation for [`Cart`].

use super::{CartAction, CartActionResult, CartError};
use crate::framework::StoreEntity;
use crate::model::Cart;
use crate::storage::keys;

impl StoreEntity for Cart {
    const STORAGE_KEY: &'static str = keys::CART;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Error = CartError;

    /// Re-prices and clamps lines written by older versions.
    fn on_restore(&mut self) {
        self.normalize();
    }

    fn handle_action(&mut self, action: CartAction) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::Add(item) => Ok(CartActionResult::Added(self.add(item))),
            CartAction::UpdateQuantity { index, delta } => self
                .update_quantity(index, delta)
                .map(|item| CartActionResult::QuantityUpdated(item.clone())),
            CartAction::Remove { index } => self.remove(index).map(CartActionResult::Removed),
            CartAction::Clear => Ok(CartActionResult::Cleared(self.clear())),
            CartAction::RemoveOrdered(items) => {
                Ok(CartActionResult::OrderedRemoved(self.remove_ordered(&items)))
            }
        }
    }
}
