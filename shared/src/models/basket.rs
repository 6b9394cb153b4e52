//! Customer cart model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BasketItemStatus {
    InCart,
    Sold,
    Removed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketItem {
    pub id: String,
    pub customer_id: String,
    pub location_id: String,
    pub sku_id: String,
    pub qty: i64,
    pub picked_confirmed_qty: i64,
    pub status: BasketItemStatus,
    pub created_at: i64,
}

/// Bound to a basket item that reserved an RFID SKU; reconciled on every
/// subsequent antenna read in the cart's location rather than suspended
/// execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPick {
    pub basket_item_id: String,
    pub sku_id: String,
    pub location_id: String,
    pub qty_remaining: i64,
    pub consumed_epcs: Vec<String>,
}

impl PendingPick {
    pub fn is_complete(&self) -> bool {
        self.qty_remaining == 0
    }
}
