use crate::pricing::line_total;
use crate::util::now_millis;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 10;

/// Clamps any signed quantity into `MIN_QUANTITY..=MAX_QUANTITY`.
pub fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY)) as u32
}

/// Cup size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub fn multiplier(self) -> f64 {
        match self {
            Size::Small => 1.0,
            Size::Medium => 1.25,
            Size::Large => 1.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a size name that is not on the menu.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown size: {0}")]
pub struct UnknownSize(pub String);

impl FromStr for Size {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "large" => Ok(Size::Large),
            _ => Err(UnknownSize(s.to_string())),
        }
    }
}

/// A menu entry as shown on the product card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Creates a new Product.
    ///
    /// # Arguments
    /// * `id` - Menu identifier, shared by every line item built from it
    /// * `name` - Display name
    /// * `price` - Base price of the small size
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            description: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A cart entry: one product in one size/add-on configuration.
///
/// # Invariant
/// `total_price` always equals
/// [`line_total`](crate::pricing::line_total)`(base_price, size, addons, quantity)`
/// and `quantity` is within [`MIN_QUANTITY`]`..=`[`MAX_QUANTITY`]. Every mutator on
/// this type re-prices the line; fields are public for reading and for
/// deserialization, mutate through the methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "price")]
    pub base_price: f64,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    pub size: Size,
    #[serde(default)]
    pub addons: BTreeSet<String>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub timestamp: i64,
}

impl LineItem {
    /// Builds a priced line from a product selection. `quantity` is clamped.
    pub fn new<I, S>(product: &Product, quantity: i64, size: Size, addons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut item = Self {
            id: product.id.clone(),
            name: product.name.clone(),
            base_price: product.price,
            image: product.image.clone(),
            quantity: clamp_quantity(quantity),
            size,
            addons: addons.into_iter().map(Into::into).collect(),
            total_price: 0.0,
            timestamp: now_millis(),
        };
        item.reprice();
        item
    }

    /// Same product, size and add-on set. Add-on order never matters.
    pub fn same_logical_item(&self, other: &LineItem) -> bool {
        self.id == other.id && self.size == other.size && self.addons == other.addons
    }

    /// Sets the quantity (clamped) and re-prices. Returns the stored quantity.
    pub fn set_quantity(&mut self, quantity: i64) -> u32 {
        self.quantity = clamp_quantity(quantity);
        self.reprice();
        self.quantity
    }

    /// Recomputes `total_price` from the other fields.
    pub fn reprice(&mut self) {
        self.total_price = line_total(self.base_price, self.size, &self.addons, self.quantity);
    }

    /// `Medium + extra shot, vanilla` style summary used in cart listings.
    pub fn options_label(&self) -> String {
        let size = self.size.as_str();
        let mut label = size[..1].to_ascii_uppercase() + &size[1..];
        if !self.addons.is_empty() {
            let addons: Vec<String> = self.addons.iter().map(|a| a.replace('-', " ")).collect();
            label.push_str(" + ");
            label.push_str(&addons.join(", "));
        }
        label
    }
}
