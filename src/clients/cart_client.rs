use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::actor_client::{entity_error, ActorClient};
use crate::framework::{FrameworkError, StateClient};
use crate::model::{AddOutcome, Cart, CartTotals, LineItem, Product, Size};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
///
/// Every mutating method returns only after the new cart has been written to
/// the store. Subscribers (see [`ActorClient::subscribe`]) see the same value.
#[derive(Clone)]
pub struct CartClient {
    inner: StateClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StateClient<Cart>) -> Self {
        Self { inner }
    }

    /// Adds `quantity` of `product` in the given configuration.
    ///
    /// `quantity` is clamped to `1..=10`. If an identical configuration is
    /// already in the cart the two lines are merged.
    #[instrument(skip(self, product, addons), fields(product_id = %product.id))]
    pub async fn add_item<I, S>(
        &self,
        product: &Product,
        quantity: i64,
        size: Size,
        addons: I,
    ) -> Result<AddOutcome, CartError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let item = LineItem::new(product, quantity, size, addons);
        debug!(quantity = item.quantity, %size, "Sending request");
        match self.perform(CartAction::Add(item)).await? {
            CartActionResult::Added(outcome) => Ok(outcome),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(&self, index: usize, delta: i32) -> Result<LineItem, CartError> {
        debug!("Sending request");
        match self.perform(CartAction::UpdateQuantity { index, delta }).await? {
            CartActionResult::QuantityUpdated(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, index: usize) -> Result<LineItem, CartError> {
        debug!("Sending request");
        match self.perform(CartAction::Remove { index }).await? {
            CartActionResult::Removed(item) => Ok(item),
            other => Err(unexpected(other)),
        }
    }

    /// Empties the cart. Returns how many lines were dropped.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.perform(CartAction::Clear).await? {
            CartActionResult::Cleared(dropped) => Ok(dropped),
            other => Err(unexpected(other)),
        }
    }

    /// Takes a placed order's lines out of the cart. Returns how many lines were dropped.
    #[instrument(skip(self, ordered), fields(lines = ordered.len()))]
    pub async fn remove_ordered(&self, ordered: Vec<LineItem>) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.perform(CartAction::RemoveOrdered(ordered)).await? {
            CartActionResult::OrderedRemoved(dropped) => Ok(dropped),
            other => Err(unexpected(other)),
        }
    }

    pub async fn items(&self) -> Result<Vec<LineItem>, CartError> {
        Ok(self.snapshot().await?.items().to_vec())
    }

    pub async fn totals(&self) -> Result<CartTotals, CartError> {
        Ok(self.snapshot().await?.totals())
    }

    async fn perform(&self, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner.perform_action(action).await.map_err(Self::map_error)
    }
}

fn unexpected(result: CartActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected result: {result:?}"))
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StateClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<CartError>(e) {
            Ok(err) => err,
            Err(FrameworkError::Storage(e)) => CartError::Storage(e.to_string()),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_add_item_clamps_before_sending() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);
        let latte = Product::new("c1", "Latte", 4.0);

        let task = tokio::spawn(async move { client.add_item(&latte, 25, Size::Small, ["caramel"]).await });

        let (action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        match action {
            CartAction::Add(item) => {
                assert_eq!(item.quantity, 10);
                assert_eq!(item.total_price, 47.5);
            }
            other => panic!("unexpected action: {other:?}"),
        }
        responder
            .send(Ok(CartActionResult::Added(AddOutcome { index: 0, merged: false })))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap().index, 0);
    }

    #[tokio::test]
    async fn test_entity_error_is_recovered() {
        let (inner, mut receiver) = create_mock_client::<Cart>(10);
        let client = CartClient::new(inner);

        let task = tokio::spawn(async move { client.remove_item(4).await });

        let (_, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        let err = CartError::IndexOutOfRange { index: 4, len: 1 };
        responder.send(Err(FrameworkError::EntityError(Box::new(err.clone())))).unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), err);
    }
}
