//! Startup wiring, graceful shutdown and log setup.

pub mod shop_system;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use shop_system::*;
