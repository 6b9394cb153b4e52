//! Small shared helpers

/// Canonical effective-rule id: `rule-<locationId>-<skuId>-<source>`, lowercased.
pub fn rule_id(location_id: &str, sku_id: &str, source: &str) -> String {
    format!("rule-{location_id}-{sku_id}-{source}").to_lowercase()
}

/// Reserved staging location an item routes through at checkout before
/// either settling back at the origin or demanding a printed replacement.
pub const CASHIER_STORAGE_LOCATION_ID: &str = "zone-cashier-storage";

/// Reserved location a replenishment task targets when a personalisable
/// SKU has no reachable supply left.
pub const PRINTING_WALL_LOCATION_ID: &str = "zone-printing-wall";

/// Prefix identifying an external (non-engine-owned) replenishment source.
pub const EXTERNAL_SOURCE_PREFIX: &str = "external-";

pub fn is_external_source(id: &str) -> bool {
    id.starts_with(EXTERNAL_SOURCE_PREFIX)
}

/// Mint a new synthetic EPC (used when receiving stock for an RFID SKU from
/// an external source, or repairing a legacy short-fall on cart removal).
pub fn new_synthetic_epc() -> String {
    format!("epc-synth-{}", uuid::Uuid::new_v4())
}

pub fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
