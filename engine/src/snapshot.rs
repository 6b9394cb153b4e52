//! Snapshot store

use shared::models::StockSource;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub location_id: String,
    pub sku_id: String,
    pub source: StockSource,
    pub qty: i64,
    pub confidence: Option<f64>,
    pub version: u64,
    pub last_calculated_at: i64,
    /// Set when an immediate low-confidence deduction wrote a provisional
    /// value that should survive ordinary recompute until reads confirm it.
    pub provisional_floor: bool,
}

pub type SnapshotKey = (String, String, StockSource);

#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: HashMap<SnapshotKey, Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, location_id: &str, sku_id: &str, source: StockSource) -> Option<&Snapshot> {
        self.snapshots
            .get(&(location_id.to_string(), sku_id.to_string(), source))
    }

    pub fn qty(&self, location_id: &str, sku_id: &str, source: StockSource) -> i64 {
        self.get(location_id, sku_id, source).map(|s| s.qty).unwrap_or(0)
    }

    /// Upsert with version++ — versions must increment on every write, even
    /// no-op writes.
    pub fn upsert(
        &mut self,
        location_id: &str,
        sku_id: &str,
        source: StockSource,
        qty: i64,
        confidence: Option<f64>,
        now: i64,
        provisional_floor: bool,
    ) {
        let key = (location_id.to_string(), sku_id.to_string(), source);
        let version = self.snapshots.get(&key).map(|s| s.version + 1).unwrap_or(1);
        self.snapshots.insert(
            key,
            Snapshot {
                location_id: location_id.to_string(),
                sku_id: sku_id.to_string(),
                source,
                qty,
                confidence,
                version,
                last_calculated_at: now,
                provisional_floor,
            },
        );
    }

    /// A quantity of 0 at the cashier-storage staging location deletes the
    /// snapshot row rather than persisting a zero.
    pub fn remove(&mut self, location_id: &str, sku_id: &str, source: StockSource) {
        self.snapshots
            .remove(&(location_id.to_string(), sku_id.to_string(), source));
    }

    pub fn for_location(&self, location_id: &str) -> Vec<&Snapshot> {
        self.snapshots
            .values()
            .filter(|s| s.location_id == location_id)
            .collect()
    }

    pub fn keys_for_location(&self, location_id: &str) -> Vec<SnapshotKey> {
        self.snapshots
            .keys()
            .filter(|(loc, _, _)| loc == location_id)
            .cloned()
            .collect()
    }
}
