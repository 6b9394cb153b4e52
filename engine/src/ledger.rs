//! NON_RFID ledger
//!
//! A baseline snapshot plus a signed movement log. A location's quantity is
//! `max(0, baseline + sum of signed deltas since baseline timestamp)`.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEntryKind {
    Sale,
    Return,
    ConfirmedReplenishment,
}

#[derive(Debug, Clone, Copy)]
struct LedgerEntry {
    delta: i64,
    timestamp: i64,
    #[allow(dead_code)]
    kind: LedgerEntryKind,
}

#[derive(Debug, Clone, Copy, Default)]
struct Baseline {
    qty: i64,
    timestamp: i64,
}

#[derive(Debug, Default)]
pub struct Ledger {
    baselines: HashMap<(String, String), Baseline>,
    entries: HashMap<(String, String), Vec<LedgerEntry>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_baseline(&mut self, location_id: &str, sku_id: &str, qty: i64, timestamp: i64) {
        let key = (location_id.to_string(), sku_id.to_string());
        self.baselines.insert(key, Baseline { qty, timestamp });
    }

    pub fn append(
        &mut self,
        location_id: &str,
        sku_id: &str,
        delta: i64,
        timestamp: i64,
        kind: LedgerEntryKind,
    ) {
        let key = (location_id.to_string(), sku_id.to_string());
        self.baselines.entry(key.clone()).or_insert(Baseline {
            qty: 0,
            timestamp: 0,
        });
        self.entries
            .entry(key)
            .or_default()
            .push(LedgerEntry { delta, timestamp, kind });
    }

    /// `max(0, baseline + sum of signed entries at or after the baseline timestamp)`.
    pub fn quantity(&self, location_id: &str, sku_id: &str) -> i64 {
        let key = (location_id.to_string(), sku_id.to_string());
        let Some(baseline) = self.baselines.get(&key) else {
            return 0;
        };
        let delta_sum: i64 = self
            .entries
            .get(&key)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.timestamp >= baseline.timestamp)
                    .map(|e| e.delta)
                    .sum()
            })
            .unwrap_or(0);
        (baseline.qty + delta_sum).max(0)
    }

    pub fn has_baseline(&self, location_id: &str, sku_id: &str) -> bool {
        self.baselines
            .contains_key(&(location_id.to_string(), sku_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conserves_baseline_plus_deltas() {
        let mut ledger = Ledger::new();
        ledger.set_baseline("shelf-a", "SKU-NR-1", 7, 0);
        ledger.append("shelf-a", "SKU-NR-1", -2, 10, LedgerEntryKind::Sale);
        ledger.append("shelf-a", "SKU-NR-1", -1, 20, LedgerEntryKind::Sale);
        ledger.append("shelf-a", "SKU-NR-1", -1, 30, LedgerEntryKind::Sale);
        assert_eq!(ledger.quantity("shelf-a", "SKU-NR-1"), 3);
    }

    #[test]
    fn never_goes_negative() {
        let mut ledger = Ledger::new();
        ledger.set_baseline("shelf-a", "SKU-NR-1", 2, 0);
        ledger.append("shelf-a", "SKU-NR-1", -10, 10, LedgerEntryKind::Sale);
        assert_eq!(ledger.quantity("shelf-a", "SKU-NR-1"), 0);
    }
}
