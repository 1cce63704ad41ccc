//! # Pricing Calculator
//!
//! Pure functions that price a configured drink. Every code path that needs a line
//! total goes through [`line_total`], so a merged cart line and a freshly added one
//! can never disagree.
//!
//! ```
//! use coffee_cart::model::Size;
//! use coffee_cart::pricing::line_total;
//!
//! let total = line_total(4.00, Size::Medium, ["vanilla"], 2);
//! assert_eq!(total, 11.50);
//! ```

use crate::model::Size;

/// Price of one add-on. Unrecognized add-ons are free.
pub fn addon_price(addon: &str) -> f64 {
    match addon {
        "extra-shot" => 1.50,
        "vanilla" | "caramel" => 0.75,
        "whipped" => 0.50,
        _ => 0.0,
    }
}

/// Names of the add-ons that carry a price, in menu order.
pub const KNOWN_ADDONS: [&str; 4] = ["extra-shot", "vanilla", "caramel", "whipped"];

/// `(base_price × size multiplier + Σ add-on prices) × quantity`.
///
/// No rounding is applied; see [`format_price`] for display.
pub fn line_total<I, S>(base_price: f64, size: Size, addons: I, quantity: u32) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let addons: f64 = addons.into_iter().map(|a| addon_price(a.as_ref())).sum();
    (base_price * size.multiplier() + addons) * f64::from(quantity)
}

/// Two-decimal display form, e.g. `$11.50`.
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}
