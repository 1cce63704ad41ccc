use crate::clients::actor_client::{entity_error, ActorClient};
use crate::framework::{FrameworkError, StateClient};
use crate::model::Order;
use crate::order_actor::{OrderAction, OrderError, OrderHistory};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Client for interacting with the Order History actor.
#[derive(Clone)]
pub struct OrderHistoryClient {
    inner: StateClient<OrderHistory>,
}

impl OrderHistoryClient {
    pub fn new(inner: StateClient<OrderHistory>) -> Self {
        Self { inner }
    }

    /// Records `order`. Returns the number of orders now in the history.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn append(&self, order: Order) -> Result<usize, OrderError> {
        info!(total = order.total, "Recording order");
        self.inner
            .perform_action(OrderAction::Append(order))
            .await
            .map_err(Self::map_error)
    }

    pub async fn list(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.snapshot().await?.orders().to_vec())
    }
}

#[async_trait]
impl ActorClient<OrderHistory> for OrderHistoryClient {
    type Error = OrderError;

    fn inner(&self) -> &StateClient<OrderHistory> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match entity_error::<OrderError>(e) {
            Ok(err) => err,
            Err(FrameworkError::Storage(e)) => OrderError::Storage(e.to_string()),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
