//! Demo: a guest fills a cart and checks out.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! COFFEE_STORE_PATH= RUST_LOG=debug cargo run   # in-memory store
//! ```

use coffee_cart::config::ShopConfig;
use coffee_cart::lifecycle::{setup_tracing, ShopSystem};
use coffee_cart::model::{Product, Size};
use coffee_cart::notice::Notice;
use coffee_cart::pricing::format_price;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ShopConfig::from_env().map_err(|e| e.to_string())?;
    let system = ShopSystem::from_config(&config).map_err(|e| e.to_string())?;

    let latte = Product::new("latte", "Caffe Latte", 4.00).with_image("images/latte.jpg");
    let mocha = Product::new("mocha", "Mocha", 4.50).with_image("images/mocha.jpg");

    let span = tracing::info_span!("shopping");
    async {
        system.cart.add_item(&latte, 2, Size::Medium, ["vanilla"]).await?;
        system.cart.add_item(&mocha, 1, Size::Large, ["extra-shot", "whipped"]).await?;
        system.cart.add_item(&latte, 1, Size::Medium, ["vanilla"]).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let totals = system.cart.totals().await.map_err(|e| e.to_string())?;
    info!(items = totals.item_count, total = %format_price(totals.grand_total), "Cart ready");

    let span = tracing::info_span!("checkout");
    match system.checkout.checkout().instrument(span).await {
        Ok(outcome) => info!(
            order_id = %outcome.order.id,
            state = ?outcome.state,
            redirect = %outcome.redirect,
            "{}",
            outcome.notice()
        ),
        Err(e) => error!(error = %e, "{}", e.notice()),
    }

    let history = system.orders.list().await.map_err(|e| e.to_string())?;
    info!(orders = history.len(), "Order history");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
