//! Custom actions for the Cart actor.
//!
//! Every mutation of the cart is one of these variants. They are handled by
//! [`StoreEntity::handle_action`](crate::framework::StoreEntity::handle_action)
//! on [`Cart`](crate::model::Cart), so the actor persists the result before
//! anyone can observe it.

use crate::model::{AddOutcome, LineItem};

/// Mutations accepted by the cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds a line, merging it into the same logical item if present.
    Add(LineItem),
    /// Shifts a line's quantity by `delta`, clamped to `1..=10`.
    UpdateQuantity { index: usize, delta: i32 },
    Remove { index: usize },
    Clear,
    /// Takes the lines of a placed order out, leaving anything added since.
    RemoveOrdered(Vec<LineItem>),
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone)]
pub enum CartActionResult {
    Added(AddOutcome),
    /// The line after the update.
    QuantityUpdated(LineItem),
    Removed(LineItem),
    /// How many lines were dropped.
    Cleared(usize),
    /// How many lines the order used up.
    OrderedRemoved(usize),
}
