//! Receiving order model

use super::sku::StockSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceivingOrderStatus {
    InTransit,
    Confirmed,
    Cancelled,
}

/// Inbound order for non-sales locations and external origins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivingOrder {
    pub id: String,
    /// Internal location id or an `external-*` id.
    pub source_location_id: String,
    pub destination_location_id: String,
    pub sku_id: String,
    pub source: StockSource,
    pub requested_qty: i64,
    pub confirmed_qty: Option<i64>,
    pub status: ReceivingOrderStatus,
    pub assigned_staff_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
