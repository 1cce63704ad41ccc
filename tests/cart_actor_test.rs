use coffee_cart::cart_actor::CartError;
use coffee_cart::clients::ActorClient;
use coffee_cart::model::{Cart, LineItem, Product, Size};
use coffee_cart::storage::{keys, load_json, KeyValueStore, MemoryStore};
use std::sync::Arc;

fn latte() -> Product {
    Product::new("c1", "Latte", 4.00)
}

fn stored_cart(store: &MemoryStore) -> Vec<LineItem> {
    load_json(store, keys::CART)
        .expect("Failed to read store")
        .expect("Cart not stored")
}

/// Real Cart actor on an in-memory store.
/// Every mutation must be visible in the store by the time the call returns.
#[tokio::test]
async fn test_cart_pricing_and_merge_scenarios() {
    // Setup
    let store = Arc::new(MemoryStore::new());
    let (actor, cart) = coffee_cart::cart_actor::new(store.clone());
    let handle = tokio::spawn(actor.run());

    // Execute: 2 × medium latte with vanilla
    cart.add_item(&latte(), 2, Size::Medium, ["vanilla"])
        .await
        .expect("Failed to add item");

    // Verify
    let items = cart.items().await.expect("Failed to read cart");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].total_price, 11.50);
    assert_eq!(stored_cart(&store)[0].total_price, 11.50);

    // Execute: same configuration again merges
    let outcome = cart
        .add_item(&latte(), 1, Size::Medium, ["vanilla"])
        .await
        .expect("Failed to add item");

    // Verify
    assert!(outcome.merged);
    let items = cart.items().await.expect("Failed to read cart");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
    assert_eq!(items[0].total_price, 17.25);
    assert_eq!(stored_cart(&store)[0].quantity, 3);

    drop(cart);
    handle.await.expect("Actor task failed");
}

#[tokio::test]
async fn test_addon_order_does_not_matter() {
    let store = Arc::new(MemoryStore::new());
    let (actor, cart) = coffee_cart::cart_actor::new(store);
    tokio::spawn(actor.run());

    cart.add_item(&latte(), 1, Size::Large, ["caramel", "extra-shot"]).await.unwrap();
    let outcome = cart.add_item(&latte(), 1, Size::Large, ["extra-shot", "caramel"]).await.unwrap();

    assert!(outcome.merged);
    let totals = cart.totals().await.unwrap();
    assert_eq!(totals.item_count, 2);
    assert_eq!(totals.grand_total, (4.0 * 1.5 + 1.5 + 0.75) * 2.0);
}

#[tokio::test]
async fn test_quantity_updates_clamp_and_persist() {
    let store = Arc::new(MemoryStore::new());
    let (actor, cart) = coffee_cart::cart_actor::new(store.clone());
    tokio::spawn(actor.run());

    cart.add_item(&latte(), 1, Size::Small, Vec::<String>::new()).await.unwrap();

    // Decrement at the floor still writes the (unchanged) cart.
    store.remove(keys::CART).unwrap();
    let line = cart.update_quantity(0, -1).await.unwrap();
    assert_eq!(line.quantity, 1);
    assert_eq!(stored_cart(&store)[0].quantity, 1);

    let line = cart.update_quantity(0, 50).await.unwrap();
    assert_eq!(line.quantity, 10);
    assert_eq!(line.total_price, 40.0);
    assert_eq!(stored_cart(&store)[0].total_price, 40.0);
}

#[tokio::test]
async fn test_bad_index_leaves_cart_untouched() {
    let store = Arc::new(MemoryStore::new());
    let (actor, cart) = coffee_cart::cart_actor::new(store.clone());
    tokio::spawn(actor.run());

    cart.add_item(&latte(), 2, Size::Small, Vec::<String>::new()).await.unwrap();
    let before = store.get(keys::CART).unwrap();

    assert_eq!(
        cart.remove_item(3).await.unwrap_err(),
        CartError::IndexOutOfRange { index: 3, len: 1 }
    );
    assert_eq!(
        cart.update_quantity(1, 1).await.unwrap_err(),
        CartError::IndexOutOfRange { index: 1, len: 1 }
    );
    assert_eq!(store.get(keys::CART).unwrap(), before);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let store = Arc::new(MemoryStore::new());
    let (actor, cart) = coffee_cart::cart_actor::new(store.clone());
    tokio::spawn(actor.run());

    cart.add_item(&latte(), 1, Size::Small, Vec::<String>::new()).await.unwrap();
    cart.add_item(&latte(), 1, Size::Large, Vec::<String>::new()).await.unwrap();

    let removed = cart.remove_item(0).await.unwrap();
    assert_eq!(removed.size, Size::Small);
    assert_eq!(stored_cart(&store).len(), 1);

    assert_eq!(cart.clear().await.unwrap(), 1);
    assert!(stored_cart(&store).is_empty());
    assert_eq!(cart.totals().await.unwrap().grand_total, 0.0);
}

/// Subscribers see every committed cart, in order.
#[tokio::test]
async fn test_subscribers_observe_commits() {
    let (actor, cart) = coffee_cart::cart_actor::new(Arc::new(MemoryStore::new()));
    tokio::spawn(actor.run());
    let mut watcher = cart.subscribe();
    assert!(watcher.borrow_and_update().is_empty());

    cart.add_item(&latte(), 1, Size::Small, Vec::<String>::new()).await.unwrap();
    watcher.changed().await.unwrap();
    assert_eq!(watcher.borrow_and_update().totals().item_count, 1);

    cart.update_quantity(0, 2).await.unwrap();
    watcher.changed().await.unwrap();
    assert_eq!(watcher.borrow_and_update().totals().item_count, 3);
}

/// A cart written by older code (stale totals, out-of-range quantity) is repaired on restore.
#[tokio::test]
async fn test_restore_reprices_stale_cart() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            keys::CART,
            r#"[{"id":"c1","name":"Latte","price":4.0,"image":"","quantity":12,"size":"medium","addons":["vanilla"],"totalPrice":1.0,"timestamp":0}]"#,
        )
        .unwrap();

    let (actor, cart) = coffee_cart::cart_actor::new(store);
    tokio::spawn(actor.run());

    let snapshot: Cart = cart.snapshot().await.unwrap();
    assert_eq!(snapshot.items()[0].quantity, 10);
    assert_eq!(snapshot.items()[0].total_price, 57.5);
}

#[tokio::test]
async fn test_corrupt_cart_starts_empty() {
    let store = Arc::new(MemoryStore::new());
    store.set(keys::CART, "[{\"id\":").unwrap();

    let (actor, cart) = coffee_cart::cart_actor::new(store.clone());
    tokio::spawn(actor.run());

    assert!(cart.items().await.unwrap().is_empty());
    assert_eq!(store.get(keys::CART).unwrap(), None);
}

#[test]
fn test_size_names_parse_at_the_boundary() {
    let size: Result<Size, CartError> = "large".parse::<Size>().map_err(Into::into);
    assert_eq!(size, Ok(Size::Large));

    let err: CartError = "venti".parse::<Size>().unwrap_err().into();
    assert_eq!(err, CartError::InvalidSize("venti".to_string()));
}
