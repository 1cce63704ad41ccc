//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`MockClient`] to script the answers an actor would give, or
//! [`create_mock_client`] plus [`expect_action`] to inspect each request by hand.

use crate::framework::{FrameworkError, StateClient, StateRequest, StoreEntity};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: StoreEntity> {
    Snapshot {
        response: Result<T, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are answered in the order the expectations were registered.
/// A request that does not match the next expectation panics the mock task,
/// which the client then sees as [`FrameworkError::ActorDropped`].
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<OrderHistory>::new();
/// mock.expect_action().return_err(FrameworkError::ActorClosed);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: StoreEntity> {
    client: StateClient<T>,
    expectations: Expectations<T>,
    _publisher: watch::Sender<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StateRequest<T>>(100);
        let (publisher, watcher) = watch::channel(T::default());
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (StateRequest::Snapshot { respond_to }, Some(Expectation::Snapshot { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StateRequest::Action { respond_to, .. }, Some(Expectation::Action { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StateClient::new(sender, watcher),
            expectations,
            _publisher: publisher,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StateClient<T> {
        self.client.clone()
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<T> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: StoreEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<T: StoreEntity> {
    expectations: Expectations<T>,
}

impl<T: StoreEntity> SnapshotExpectationBuilder<T> {
    pub fn return_ok(self, value: T) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Err(error) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: StoreEntity> {
    expectations: Expectations<T>,
}

impl<T: StoreEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Err(error) });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
///
/// # Testing Strategy
/// Spinning up a real [`StateActor`](crate::framework::StateActor) is cheap, but
/// some tests need to see *what* a domain client sends (e.g. that
/// `CartClient::add_item` clamps before sending). The returned receiver lets the
/// test pull each request, assert on it and answer it.
pub fn create_mock_client<T: StoreEntity>(
    buffer_size: usize,
) -> (StateClient<T>, mpsc::Receiver<StateRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, watcher) = watch::channel(T::default());
    (StateClient::new(sender, watcher), receiver)
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StateRequest<T>>,
) -> Option<(T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StateRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StateRequest<T>>,
) -> Option<oneshot::Sender<Result<T, FrameworkError>>> {
    match receiver.recv().await {
        Some(StateRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::{CartAction, CartActionResult};
    use crate::model::{AddOutcome, Cart, LineItem, Product, Size};

    #[tokio::test]
    async fn test_mock_client_channel() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);

        let task = tokio::spawn(async move { client.perform_action(CartAction::Clear).await });

        let (action, responder) = expect_action(&mut receiver).await.expect("Expected Action request");
        assert!(matches!(action, CartAction::Clear));
        responder.send(Ok(CartActionResult::Cleared(2))).unwrap();

        let result = task.await.unwrap().unwrap();
        assert!(matches!(result, CartActionResult::Cleared(2)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let latte = Product::new("c1", "Latte", 4.0);
        let mut cart = Cart::new();
        cart.add(LineItem::new(&latte, 1, Size::Small, Vec::<String>::new()));

        let mut mock = MockClient::<Cart>::new();
        mock.expect_action()
            .return_ok(CartActionResult::Added(AddOutcome { index: 0, merged: false }));
        mock.expect_snapshot().return_ok(cart);

        let client = mock.client();
        let added = client
            .perform_action(CartAction::Add(LineItem::new(&latte, 1, Size::Small, Vec::<String>::new())))
            .await
            .unwrap();
        assert!(matches!(added, CartActionResult::Added(AddOutcome { merged: false, .. })));
        assert_eq!(client.snapshot().await.unwrap().len(), 1);

        mock.verify();
    }
}
