//! # Core State Framework
//!
//! This module defines the generic building blocks for persisted, observable state.
//!
//! ## Key Types
//!
//! - [`StoreEntity`]: The trait every persisted state type implements.
//! - [`StateActor`]: The generic actor that owns one state value.
//! - [`StateClient`]: The generic client for communicating with the actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, Storage).

use crate::storage::{load_json, save_json, KeyValueStore, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (State + Actions)
// =============================================================================

/// Trait that any persisted state must implement to be owned by a [`StateActor`].
///
/// # Architecture Note
/// The cart and the order history are both "one value, kept in one store key,
/// changed only by a closed set of actions". Writing that loop once means the
/// rules about persistence (write before commit, publish after commit) hold for
/// every state type automatically.
///
/// The state is loaded from [`StoreEntity::STORAGE_KEY`] when the actor is created.
/// A missing or corrupt entry yields `Default::default()`.
pub trait StoreEntity:
    Clone + Default + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Key under which the whole state is stored.
    const STORAGE_KEY: &'static str;

    /// Enum of the mutations this state accepts.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type for rejected actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once after the state is loaded from the store.
    /// Use this hook to repair invariants on data written by older versions.
    fn on_restore(&mut self) {}

    /// Apply one action.
    ///
    /// The actor calls this on a copy of the current state; an `Err` leaves the
    /// committed state untouched.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the state framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Snapshot**: a clone of the committed state.
/// - **Action**: a mutation, persisted before it is committed.
#[derive(Debug)]
pub enum StateRequest<T: StoreEntity> {
    Snapshot {
        respond_to: Response<T>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns one persisted state value.
///
/// **Concurrency Model**:
/// Requests are processed one at a time, so the state needs no lock. Every
/// committed change is pushed to a `watch` channel; UI code subscribes through
/// [`StateClient::subscribe`] and re-renders on each new value.
///
/// **Durability**:
/// An action is applied to a copy, the copy is written to the store, and only
/// then does it replace the live state. A failed write answers the caller with
/// [`FrameworkError::Storage`] and changes nothing.
pub struct StateActor<T: StoreEntity> {
    receiver: mpsc::Receiver<StateRequest<T>>,
    state: T,
    store: Arc<dyn KeyValueStore>,
    publisher: watch::Sender<T>,
}

impl<T: StoreEntity> StateActor<T> {
    /// Restores the state from `store` and returns the actor with its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client wait until there is space.
    /// * `store` - Where the state is read from now and written to on every action.
    pub fn new(buffer_size: usize, store: Arc<dyn KeyValueStore>) -> (Self, StateClient<T>) {
        let mut state = match load_json::<T>(store.as_ref(), T::STORAGE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key = T::STORAGE_KEY, error = %e, "Restore failed, starting empty");
                T::default()
            }
        };
        state.on_restore();

        let (publisher, watcher) = watch::channel(state.clone());
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state,
            store,
            publisher,
        };
        (actor, StateClient::new(sender, watcher))
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Cart" instead of "coffee_cart::model::cart::Cart")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, key = T::STORAGE_KEY, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Snapshot { respond_to } => {
                    debug!(entity_type, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                StateRequest::Action { action, respond_to } => {
                    debug!(entity_type, ?action, "Action");
                    let mut next = self.state.clone();
                    let result = match next.handle_action(action) {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = save_json(self.store.as_ref(), T::STORAGE_KEY, &next) {
                        warn!(entity_type, error = %e, "Persist failed, action rolled back");
                        let _ = respond_to.send(Err(FrameworkError::Storage(e)));
                        continue;
                    }
                    self.state = next;
                    self.publisher.send_replace(self.state.clone());
                    info!(entity_type, "Action ok");
                    let _ = respond_to.send(Ok(result));
                }
            }
        }

        info!(entity_type, "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a [`StateActor`].
///
/// Cloning is cheap: a channel sender and a watch receiver.
#[derive(Clone)]
pub struct StateClient<T: StoreEntity> {
    sender: mpsc::Sender<StateRequest<T>>,
    watcher: watch::Receiver<T>,
}

impl<T: StoreEntity> StateClient<T> {
    pub fn new(sender: mpsc::Sender<StateRequest<T>>, watcher: watch::Receiver<T>) -> Self {
        Self { sender, watcher }
    }

    pub async fn snapshot(&self) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// A receiver that yields every committed state.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.watcher.clone()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
