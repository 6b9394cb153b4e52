//! Dedup window: suppresses repeated RFID reads of the same tag at the same
//! antenna within a short interval.

use std::collections::HashMap;

/// Default dedup window, expressed in milliseconds to match the engine's
/// timestamp unit.
pub const DEFAULT_DEDUP_WINDOW_MS: i64 = 15_000;

/// Accept/reject reads by `(epc, antenna)` within a time window. A read is
/// rejected if the most recent accepted read for the same pair satisfies
/// `prev.t >= t - window`. Rejection is silent and does not advance the
/// clock cursor — the caller is responsible for only advancing the cursor
/// on acceptance.
#[derive(Debug, Default)]
pub struct DedupWindow {
    window_ms: i64,
    last_accepted: HashMap<(String, String), i64>,
}

impl DedupWindow {
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms,
            last_accepted: HashMap::new(),
        }
    }

    /// Returns true and records `t` if the read is accepted; returns false
    /// (leaving the prior record untouched) if it is a duplicate.
    pub fn try_accept(&mut self, epc: &str, antenna_id: &str, t: i64) -> bool {
        let key = (epc.to_string(), antenna_id.to_string());
        if let Some(&prev) = self.last_accepted.get(&key)
            && prev >= t - self.window_ms
        {
            return false;
        }
        self.last_accepted.insert(key, t);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_read_within_window() {
        let mut dedup = DedupWindow::new(DEFAULT_DEDUP_WINDOW_MS);
        assert!(dedup.try_accept("EPC-1", "ant-1", 1_000));
        assert!(!dedup.try_accept("EPC-1", "ant-1", 11_000));
        assert!(dedup.try_accept("EPC-1", "ant-1", 16_000));
    }

    #[test]
    fn different_antennas_are_independent() {
        let mut dedup = DedupWindow::new(DEFAULT_DEDUP_WINDOW_MS);
        assert!(dedup.try_accept("EPC-1", "ant-1", 1_000));
        assert!(dedup.try_accept("EPC-1", "ant-2", 1_500));
    }
}
