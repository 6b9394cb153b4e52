//! Sale and return ingestion: the ledger/presence movement shared by the
//! sales-event command and checkout.

use crate::ledger::{Ledger, LedgerEntryKind};
use crate::presence::PresenceStore;
use crate::snapshot::SnapshotStore;
use shared::models::StockSource;

/// Apply one sale or return of `qty` units of `sku_id` at `location_id`.
///
/// A sale of an RFID SKU removes physical tags immediately rather than
/// waiting for the next recompute: up to `qty` oldest-seen present EPCs are
/// dropped from presence, and if the ordinary recompute would still see
/// more tags than that (because not every unit carries a tag, or a tag
/// hasn't timed out of presence yet), the snapshot is republished at the
/// deducted value with confidence 0.55 until subsequent reads confirm it.
/// Every other combination — NON_RFID sales, and any return regardless of
/// source — is a ledger movement.
pub fn apply_movement(
    location_id: &str,
    sku_id: &str,
    source: StockSource,
    kind: LedgerEntryKind,
    qty: i64,
    now: i64,
    presence: &mut PresenceStore,
    ledger: &mut Ledger,
    snapshots: &mut SnapshotStore,
    ttl_ms: i64,
) {
    if source == StockSource::Rfid && kind == LedgerEntryKind::Sale {
        let epcs = presence.present_epcs_of_sku(location_id, sku_id, now, ttl_ms);
        let removed: Vec<String> = epcs.into_iter().take(qty.max(0) as usize).collect();
        for epc in &removed {
            presence.remove(epc);
        }
        let remaining_present = presence.present_count(location_id, sku_id, now, ttl_ms);
        let prior_qty = snapshots.qty(location_id, sku_id, source);
        let deducted = (prior_qty - removed.len() as i64).max(0);
        if remaining_present > deducted {
            snapshots.upsert(location_id, sku_id, source, deducted, Some(0.55), now, true);
        }
        return;
    }

    let signed = match kind {
        LedgerEntryKind::Sale => -qty,
        LedgerEntryKind::Return | LedgerEntryKind::ConfirmedReplenishment => qty,
    };
    ledger.append(location_id, sku_id, signed, now, kind);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfid_sale_removes_presence_immediately() {
        let mut presence = PresenceStore::new();
        let mut ledger = Ledger::new();
        let mut snapshots = SnapshotStore::new();
        presence.record_read("EPC-1", "SKU-1", "shelf-a", "ant-1", 0, None);
        snapshots.upsert("shelf-a", "SKU-1", StockSource::Rfid, 1, Some(0.9), 0, false);

        apply_movement(
            "shelf-a",
            "SKU-1",
            StockSource::Rfid,
            LedgerEntryKind::Sale,
            1,
            10,
            &mut presence,
            &mut ledger,
            &mut snapshots,
            300_000,
        );

        assert!(!presence.is_present("EPC-1", "shelf-a", 10, 300_000));
    }

    #[test]
    fn non_rfid_sale_debits_ledger() {
        let mut presence = PresenceStore::new();
        let mut ledger = Ledger::new();
        let mut snapshots = SnapshotStore::new();
        ledger.set_baseline("shelf-a", "SKU-2", 5, 0);

        apply_movement(
            "shelf-a",
            "SKU-2",
            StockSource::NonRfid,
            LedgerEntryKind::Sale,
            2,
            10,
            &mut presence,
            &mut ledger,
            &mut snapshots,
            300_000,
        );

        assert_eq!(ledger.quantity("shelf-a", "SKU-2"), 3);
    }
}
