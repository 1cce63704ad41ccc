use crate::model::{LineItem, Size, UserIdentity};
use serde::Serialize;

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub delivery_address: String,
    pub items: Vec<PayloadItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub delivery_fee: f64,
    pub notes: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadItem {
    pub name: String,
    /// Base price before size and add-ons.
    pub price: f64,
    pub quantity: u32,
    pub size: Size,
    pub addons: Vec<String>,
    pub image: String,
    pub total_price: f64,
}

impl OrderPayload {
    pub fn new(user: &UserIdentity, items: &[LineItem]) -> Self {
        let name = if user.name.is_empty() { "Guest User" } else { user.name.as_str() };
        Self {
            user_id: user.id.clone(),
            user_name: name.to_string(),
            user_email: user.email.clone().unwrap_or_default(),
            user_phone: user.phone.clone().unwrap_or_default(),
            delivery_address: user.address.clone().unwrap_or_default(),
            items: items.iter().map(PayloadItem::from).collect(),
            subtotal: items.iter().map(|i| i.total_price).sum(),
            tax: 0.0,
            delivery_fee: 0.0,
            notes: String::new(),
            payment_method: "cash".to_string(),
        }
    }
}

impl From<&LineItem> for PayloadItem {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.base_price,
            quantity: item.quantity,
            size: item.size,
            addons: item.addons.iter().cloned().collect(),
            image: item.image.clone(),
            total_price: item.total_price,
        }
    }
}
