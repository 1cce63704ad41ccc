use crate::auth::AuthService;
use crate::booking::BookingService;
use crate::checkout::{CheckoutOrchestrator, IdentityResolver};
use crate::clients::{CartClient, OrderHistoryClient};
use crate::config::{ShopConfig, TransportMode};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use crate::transport::{HttpTransport, MockTransport, Transport, TransportError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Could not open store: {0}")]
    Storage(#[from] StorageError),
    #[error("Could not create transport: {0}")]
    Transport(#[from] TransportError),
}

/// The running shop.
///
/// `ShopSystem` is responsible for:
/// - **Restore**: the cart and order history actors load their state from the
///   store before the first request is served
/// - **Dependency Wiring**: checkout gets the cart, the history, the identity
///   resolver and the transport
/// - **Shutdown**: dropping every client and waiting for the actors to exit
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::from_config(&ShopConfig::from_env()?)?;
///
/// system.cart.add_item(&latte, 2, Size::Medium, ["vanilla"]).await?;
/// let outcome = system.checkout.checkout().await?;
///
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    pub cart: CartClient,
    pub orders: OrderHistoryClient,
    pub checkout: CheckoutOrchestrator,
    pub auth: AuthService,
    pub booking: BookingService,
    pub store: Arc<dyn KeyValueStore>,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Opens the configured store and transport, then starts the shop.
    pub fn from_config(config: &ShopConfig) -> Result<Self, StartupError> {
        let store: Arc<dyn KeyValueStore> = match &config.store_path {
            Some(path) => Arc::new(FileStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        };
        let transport: Arc<dyn Transport> = match config.transport {
            TransportMode::Mock => Arc::new(MockTransport::new(store.clone())),
            TransportMode::Http => Arc::new(HttpTransport::new(
                config.api_base_url.clone(),
                config.request_timeout,
            )?),
        };
        info!(transport = ?config.transport, store = ?config.store_path, "Starting shop");

        Ok(Self::start(store, transport, config.clear_cart_on_fallback))
    }

    /// Starts the shop on an existing store and transport.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn start(
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn Transport>,
        clear_cart_on_fallback: bool,
    ) -> Self {
        // 1. Create actors (state restored here)
        let (cart_actor, cart) = crate::cart_actor::new(store.clone());
        let (order_actor, orders) = crate::order_actor::new(store.clone());

        // 2. Start actors
        let handles = vec![tokio::spawn(cart_actor.run()), tokio::spawn(order_actor.run())];

        // 3. Wire services
        let identity = IdentityResolver::new(transport.clone(), store.clone());
        let checkout = CheckoutOrchestrator::new(
            cart.clone(),
            orders.clone(),
            identity,
            transport.clone(),
            clear_cart_on_fallback,
        );

        Self {
            cart,
            orders,
            checkout,
            auth: AuthService::new(transport.clone(), store.clone()),
            booking: BookingService::new(transport),
            store,
            handles,
        }
    }

    /// Gracefully shuts down the shop.
    ///
    /// Dropping the clients closes the actor channels; each actor finishes
    /// the requests already queued and exits. Every committed change is
    /// already in the store.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop...");

        drop(self.checkout);
        drop(self.cart);
        drop(self.orders);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Shop shutdown complete.");
        Ok(())
    }
}
