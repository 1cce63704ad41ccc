use super::{payment_redirect, CheckoutError, CheckoutOutcome, CheckoutState, IdentityResolver, OrderPayload};
use crate::clients::{ActorClient, CartClient, OrderHistoryClient};
use crate::model::{Order, Product, Size};
use crate::transport::{paths, ApiRequest, Transport};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// Held for the duration of one checkout.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Places orders from the cart.
///
/// Cheap to clone; clones share the in-flight flag and the state channel, so a
/// second `checkout` from any clone is refused while one is running.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    cart: CartClient,
    history: OrderHistoryClient,
    identity: IdentityResolver,
    transport: Arc<dyn Transport>,
    clear_cart_on_fallback: bool,
    in_flight: Arc<AtomicBool>,
    state: Arc<watch::Sender<CheckoutState>>,
}

impl CheckoutOrchestrator {
    pub fn new(
        cart: CartClient,
        history: OrderHistoryClient,
        identity: IdentityResolver,
        transport: Arc<dyn Transport>,
        clear_cart_on_fallback: bool,
    ) -> Self {
        let (state, _) = watch::channel(CheckoutState::Idle);
        Self {
            cart,
            history,
            identity,
            transport,
            clear_cart_on_fallback,
            in_flight: Arc::new(AtomicBool::new(false)),
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> CheckoutState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Places an order for everything in the cart.
    ///
    /// # Errors
    /// - [`CheckoutError::InProgress`] if another checkout is running. Nothing else happens.
    /// - [`CheckoutError::EmptyCart`] for an empty cart. No request is made.
    /// - Cart or history failures end in [`CheckoutState::Failed`] with the cart kept.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<CheckoutOutcome, CheckoutError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("Checkout already in progress");
            return Err(CheckoutError::InProgress);
        };
        let result = self.run().await;
        self.settle(result)
    }

    /// Adds one configured item and checks out straight away.
    #[instrument(skip(self, product, addons), fields(product_id = %product.id))]
    pub async fn buy_now<I, S>(
        &self,
        product: &Product,
        quantity: i64,
        size: Size,
        addons: I,
    ) -> Result<CheckoutOutcome, CheckoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            warn!("Checkout already in progress");
            return Err(CheckoutError::InProgress);
        };
        let result = match self.cart.add_item(product, quantity, size, addons).await {
            Ok(_) => self.run().await,
            Err(e) => Err(e.into()),
        };
        self.settle(result)
    }

    fn transition(&self, state: CheckoutState) {
        info!(?state, "Checkout state");
        self.state.send_replace(state);
    }

    fn settle(&self, result: Result<CheckoutOutcome, CheckoutError>) -> Result<CheckoutOutcome, CheckoutError> {
        match &result {
            Ok(outcome) => self.transition(outcome.state),
            Err(CheckoutError::EmptyCart) => self.transition(CheckoutState::Rejected),
            Err(e) => {
                warn!(error = %e, "Checkout failed");
                self.transition(CheckoutState::Failed);
            }
        }
        result
    }

    async fn run(&self) -> Result<CheckoutOutcome, CheckoutError> {
        self.transition(CheckoutState::ValidatingCart);
        let cart = self.cart.snapshot().await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.transition(CheckoutState::ResolvingIdentity);
        let user = self.identity.resolve().await;
        let mut order = Order::new(&user.id, cart.items().to_vec());
        let body = serde_json::to_value(OrderPayload::new(&user, &order.items))
            .map_err(|e| CheckoutError::Payload(e.to_string()))?;

        self.transition(CheckoutState::SubmittingOrder);
        match self.submit(body).await {
            Some(server_id) => {
                order.id = server_id;
                // The server holds the order; the local copy is a convenience.
                if let Err(e) = self.history.append(order.clone()).await {
                    warn!(order_id = %order.id, error = %e, "Could not record confirmed order locally");
                }
                let cart_cleared = self.settle_cart(&order).await;
                Ok(Self::outcome(CheckoutState::Success, order, cart_cleared))
            }
            None => {
                self.history.append(order.clone()).await?;
                let cart_cleared = self.clear_cart_on_fallback && self.settle_cart(&order).await;
                Ok(Self::outcome(CheckoutState::Fallback, order, cart_cleared))
            }
        }
    }

    /// Posts the order. Returns the server's order id, or `None` if the server
    /// did not confirm it.
    async fn submit(&self, body: Value) -> Option<String> {
        let response = match self.transport.send(ApiRequest::post(paths::ORDERS, body)).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Order submission failed, keeping order locally");
                return None;
            }
        };
        if !response.is_success() {
            warn!(status = response.status, "Order submission refused, keeping order locally");
            return None;
        }

        let order_id = response.body.get("data").and_then(|d| d.get("orderId"));
        match order_id {
            Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => {
                warn!("Order response has no orderId, keeping order locally");
                None
            }
        }
    }

    /// Removes the ordered lines only; the cart may have changed since the snapshot.
    async fn settle_cart(&self, order: &Order) -> bool {
        match self.cart.remove_ordered(order.items.clone()).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Could not take ordered lines out of cart");
                false
            }
        }
    }

    fn outcome(state: CheckoutState, order: Order, cart_cleared: bool) -> CheckoutOutcome {
        info!(order_id = %order.id, ?state, total = order.total, "Order placed");
        CheckoutOutcome {
            state,
            redirect: payment_redirect(&order.id),
            order,
            cart_cleared,
        }
    }
}
