//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered
//! by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup (with the store key), shutdown
//! - **State Changes**: every cart and history action, with `entity_type`
//! - **Checkout**: each state transition, the submission result, fallbacks
//! - **Session**: login, logout, identity resolution
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show every action payload
//! RUST_LOG=debug cargo run
//!
//! # Only checkout internals
//! RUST_LOG=coffee_cart::checkout=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a fallback checkout reads roughly:
//!
//! ```text
//! INFO Actor started entity_type="Cart" key="coffeeCart"
//! INFO add_item: Action ok entity_type="Cart"
//! INFO checkout: Checkout state state=ValidatingCart
//! INFO checkout: Checkout state state=ResolvingIdentity
//! INFO checkout: Checkout state state=SubmittingOrder
//! WARN checkout: Order submission failed, keeping order locally error=Route not available: /api/orders
//! INFO checkout:append: Recording order total=11.5 order_id=ord_1760000000000
//! INFO checkout: Order placed order_id=ord_1760000000000 state=Fallback total=11.5
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "checkout:append")
        .init();
}
