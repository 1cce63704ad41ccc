use crate::cart_actor::CartError;
use crate::model::{LineItem, MAX_QUANTITY};
use serde::{Deserialize, Serialize};

/// The shopping cart: an ordered list of [`LineItem`]s.
///
/// Insertion order is display order. The cart serializes as a bare JSON array,
/// the same shape stored under [`keys::CART`](crate::storage::keys::CART).
///
/// # Actor Framework
/// This struct implements the [`StoreEntity`](crate::framework::StoreEntity) trait,
/// so a [`StateActor`](crate::framework::StateActor) owns it and persists it after
/// every committed action. See [`CartAction`](crate::cart_actor::CartAction).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Aggregate numbers shown next to the cart icon and in the cart footer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartTotals {
    pub item_count: u32,
    pub grand_total: f64,
}

/// Where an added item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    pub index: usize,
    /// `true` if the item was folded into an existing line.
    pub merged: bool,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `item`, merging it into the matching line if there is one.
    ///
    /// A merged line keeps its position and timestamp; its quantity is the sum,
    /// capped at [`MAX_QUANTITY`].
    pub fn add(&mut self, item: LineItem) -> AddOutcome {
        match self.items.iter().position(|i| i.same_logical_item(&item)) {
            Some(index) => {
                let existing = &mut self.items[index];
                let combined = i64::from(existing.quantity) + i64::from(item.quantity);
                existing.set_quantity(combined.min(i64::from(MAX_QUANTITY)));
                AddOutcome { index, merged: true }
            }
            None => {
                self.items.push(item);
                AddOutcome {
                    index: self.items.len() - 1,
                    merged: false,
                }
            }
        }
    }

    /// Shifts the quantity at `index` by `delta`, clamped to the allowed range.
    pub fn update_quantity(&mut self, index: usize, delta: i32) -> Result<&LineItem, CartError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;
        item.set_quantity(i64::from(item.quantity) + i64::from(delta));
        Ok(item)
    }

    pub fn remove(&mut self, index: usize) -> Result<LineItem, CartError> {
        if index >= self.items.len() {
            return Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Empties the cart, returning how many lines were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.items.len();
        self.items.clear();
        dropped
    }

    /// Takes the lines of a placed order out of the cart.
    ///
    /// Each ordered line is subtracted from the matching cart line; a line whose
    /// quantity is used up is dropped. Lines with no ordered counterpart, and
    /// quantity added after `ordered` was taken, stay. Returns how many lines
    /// were dropped.
    pub fn remove_ordered(&mut self, ordered: &[LineItem]) -> usize {
        let before = self.items.len();
        for placed in ordered {
            let Some(index) = self.items.iter().position(|i| i.same_logical_item(placed)) else {
                continue;
            };
            let left = i64::from(self.items[index].quantity) - i64::from(placed.quantity);
            if left > 0 {
                self.items[index].set_quantity(left);
            } else {
                self.items.remove(index);
            }
        }
        before - self.items.len()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.items.iter().map(|i| i.quantity).sum(),
            grand_total: self.items.iter().map(|i| i.total_price).sum(),
        }
    }

    /// Re-establishes the line invariants on data loaded from storage.
    pub fn normalize(&mut self) {
        for item in &mut self.items {
            item.set_quantity(i64::from(item.quantity));
        }
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        let mut cart = Self { items };
        cart.normalize();
        cart
    }
}
