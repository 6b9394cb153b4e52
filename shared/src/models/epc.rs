//! EPC mapping and presence model

use serde::{Deserialize, Serialize};

/// Time-windowed association between an EPC and a SKU. At most one mapping
/// is active for a given EPC at any instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpcMapping {
    pub epc: String,
    pub sku_id: String,
    pub active_from: i64,
    pub active_to: Option<i64>,
}

impl EpcMapping {
    pub fn is_active_at(&self, t: i64) -> bool {
        t >= self.active_from && self.active_to.is_none_or(|end| t < end)
    }
}

/// The engine's belief that an EPC is physically present in a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub epc: String,
    pub sku_id: String,
    pub location_id: String,
    pub antenna_id: String,
    pub last_seen_at: i64,
    pub rssi: Option<f64>,
}
