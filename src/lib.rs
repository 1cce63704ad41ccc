//! # Coffee Cart
//!
//! Cart pricing, persistence and checkout for a small coffee-shop storefront.
//!
//! The crate holds everything a storefront page does besides drawing: the cart
//! with its size and add-on pricing, the order history, checkout against the
//! shop API (with a local fallback when the API does not answer), the login
//! session and the table booking form.
//!
//! ## Core Concepts
//!
//! ### One actor per persisted state
//! The cart and the order history are each owned by a
//! [`StateActor`](framework::StateActor). Every change is an action that is
//! applied to a copy, written to the [`KeyValueStore`](storage::KeyValueStore)
//! and only then committed. Callers observe committed states through a
//! `watch` channel ([`ActorClient::subscribe`](clients::ActorClient::subscribe)),
//! which is what a UI re-renders from.
//!
//! ### Pricing
//! A line costs `(base × size multiplier + Σ add-ons) × quantity`. The same
//! function ([`pricing::line_total`]) prices new lines, merged lines and lines
//! restored from storage.
//!
//! ### Remote calls
//! All network access goes through [`Transport`](transport::Transport).
//! [`MockTransport`](transport::MockTransport) serves the auth routes from the
//! store so the shop works without a server; checkout then records orders
//! locally.
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic state actor, its client and test mocks.
//! - [`cart_actor`], [`order_actor`]: the two states and their actions.
//! - [`clients`]: typed wrappers used by the rest of the crate.
//! - [`checkout`]: identity resolution, submission and the fallback path.
//! - [`auth`], [`booking`]: session and booking form.
//! - [`lifecycle`]: [`ShopSystem`](lifecycle::ShopSystem) wiring and shutdown.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod auth;
pub mod booking;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notice;
pub mod order_actor;
pub mod pricing;
pub mod storage;
pub mod transport;
pub mod util;
