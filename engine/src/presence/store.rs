//! Presence store: tracks the last time each EPC was read and where.

use shared::models::PresenceRecord;
use std::collections::HashMap;

pub const DEFAULT_PRESENCE_TTL_MS: i64 = 300_000;

/// Per-EPC last-seen record. An EPC contributes to RFID stock in a location
/// iff `now - last_seen_at <= ttl` AND the record's location matches.
#[derive(Debug, Default)]
pub struct PresenceStore {
    records: HashMap<String, PresenceRecord>,
}

impl PresenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A read updates the EPC's presence record even if it changes the
    /// location (the tag physically moved).
    pub fn record_read(
        &mut self,
        epc: &str,
        sku_id: &str,
        location_id: &str,
        antenna_id: &str,
        t: i64,
        rssi: Option<f64>,
    ) {
        self.records.insert(
            epc.to_string(),
            PresenceRecord {
                epc: epc.to_string(),
                sku_id: sku_id.to_string(),
                location_id: location_id.to_string(),
                antenna_id: antenna_id.to_string(),
                last_seen_at: t,
                rssi,
            },
        );
    }

    pub fn get(&self, epc: &str) -> Option<&PresenceRecord> {
        self.records.get(epc)
    }

    pub fn remove(&mut self, epc: &str) -> Option<PresenceRecord> {
        self.records.remove(epc)
    }

    /// True if the EPC is present in `location_id` as of `now` under `ttl`.
    pub fn is_present(&self, epc: &str, location_id: &str, now: i64, ttl_ms: i64) -> bool {
        self.records
            .get(epc)
            .is_some_and(|r| r.location_id == location_id && now - r.last_seen_at <= ttl_ms)
    }

    /// EPCs of `sku_id` currently present in `location_id`, oldest-seen first.
    pub fn present_epcs_of_sku(
        &self,
        location_id: &str,
        sku_id: &str,
        now: i64,
        ttl_ms: i64,
    ) -> Vec<String> {
        let mut epcs: Vec<&PresenceRecord> = self
            .records
            .values()
            .filter(|r| {
                r.sku_id == sku_id && r.location_id == location_id && now - r.last_seen_at <= ttl_ms
            })
            .collect();
        epcs.sort_by_key(|r| r.last_seen_at);
        epcs.into_iter().map(|r| r.epc.clone()).collect()
    }

    /// Count of present EPCs for `(location, sku)`, used by recompute.
    pub fn present_count(&self, location_id: &str, sku_id: &str, now: i64, ttl_ms: i64) -> i64 {
        self.records
            .values()
            .filter(|r| {
                r.sku_id == sku_id && r.location_id == location_id && now - r.last_seen_at <= ttl_ms
            })
            .count() as i64
    }

    /// All SKU ids with at least one EPC currently present in a location.
    pub fn present_skus(&self, location_id: &str, now: i64, ttl_ms: i64) -> Vec<String> {
        let mut skus: Vec<String> = self
            .records
            .values()
            .filter(|r| r.location_id == location_id && now - r.last_seen_at <= ttl_ms)
            .map(|r| r.sku_id.clone())
            .collect();
        skus.sort();
        skus.dedup();
        skus
    }

    /// Every record currently present in a location, most-recently-seen
    /// order is left to the caller; used by the zone-detail read model.
    pub fn for_location(&self, location_id: &str, now: i64, ttl_ms: i64) -> Vec<&PresenceRecord> {
        self.records
            .values()
            .filter(|r| r.location_id == location_id && now - r.last_seen_at <= ttl_ms)
            .collect()
    }

    /// Forced zone scan: refresh `last_seen_at` of every EPC currently bound
    /// to `location_id` without changing their binding.
    pub fn sweep_refresh(&mut self, location_id: &str, t: i64) -> usize {
        let mut count = 0;
        for record in self.records.values_mut() {
            if record.location_id == location_id {
                record.last_seen_at = t;
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_respects_ttl_and_location() {
        let mut store = PresenceStore::new();
        store.record_read("EPC-1", "SKU-1", "shelf-a", "ant-1", 0, None);
        assert!(store.is_present("EPC-1", "shelf-a", 0, DEFAULT_PRESENCE_TTL_MS));
        assert!(store.is_present("EPC-1", "shelf-a", 299_000, DEFAULT_PRESENCE_TTL_MS));
        assert!(!store.is_present("EPC-1", "shelf-a", 400_000, DEFAULT_PRESENCE_TTL_MS));
        assert!(!store.is_present("EPC-1", "shelf-b", 0, DEFAULT_PRESENCE_TTL_MS));
    }

    #[test]
    fn read_moves_binding() {
        let mut store = PresenceStore::new();
        store.record_read("EPC-1", "SKU-1", "shelf-a", "ant-1", 0, None);
        store.record_read("EPC-1", "SKU-1", "shelf-b", "ant-2", 10, None);
        assert!(!store.is_present("EPC-1", "shelf-a", 10, DEFAULT_PRESENCE_TTL_MS));
        assert!(store.is_present("EPC-1", "shelf-b", 10, DEFAULT_PRESENCE_TTL_MS));
    }

    #[test]
    fn sweep_refreshes_without_rebinding() {
        let mut store = PresenceStore::new();
        store.record_read("EPC-1", "SKU-1", "shelf-a", "ant-1", 0, None);
        store.sweep_refresh("shelf-a", 250_000);
        assert!(store.is_present("EPC-1", "shelf-a", 549_000, DEFAULT_PRESENCE_TTL_MS));
    }
}
