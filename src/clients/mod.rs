//! Type-safe wrappers around [`StateClient`](crate::framework::StateClient).

pub mod actor_client;
pub mod cart_client;
pub mod order_client;

pub use actor_client::ActorClient;
pub use cart_client::*;
pub use order_client::*;
