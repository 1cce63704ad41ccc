//! Pure data structures: menu products, cart lines, orders and identities.
//!
//! [`Cart`] and [`OrderHistory`](crate::order_actor::OrderHistory) implement the
//! [`StoreEntity`](crate::framework::StoreEntity) trait in their actor modules.

pub mod cart;
pub mod line_item;
pub mod order;
pub mod user;

pub use cart::*;
pub use line_item::*;
pub use order::*;
pub use user::*;
