//! Generic state framework for persisted, observable values.
//!
//! This module provides the building blocks shared by the cart and the order
//! history: one tokio task owns one value, applies actions to it, writes it to
//! the [`KeyValueStore`](crate::storage::KeyValueStore) and publishes it.
//!
//! # Main Components
//!
//! - [`StoreEntity`] - Trait that state types implement to be owned by an actor
//! - [`StateActor`] - Generic actor that owns the value
//! - [`StateClient`] - Type-safe client for talking to the actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
