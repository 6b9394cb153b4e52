//! Physical movement between locations: the only place EPCs change
//! presence location or ledgers change hands as part of confirming
//! replenishment. Shared by receiving-order confirmation and task
//! confirmation — both are "move stock from a source to a destination",
//! they differ only in whether the source is internal or external.

use crate::epc_mappings::EpcMappingStore;
use crate::ledger::{Ledger, LedgerEntryKind};
use crate::presence::PresenceStore;
use shared::util;

/// Move up to `requested_qty` currently-present EPCs of `sku_id` from
/// `source_location_id` to `dest_location_id`, oldest-seen first, re-binding
/// each to the destination's primary antenna. Returns the count actually
/// moved, which may be less than requested.
pub fn move_internal_rfid(
    source_location_id: &str,
    dest_location_id: &str,
    dest_primary_antenna_id: &str,
    sku_id: &str,
    requested_qty: i64,
    now: i64,
    presence: &mut PresenceStore,
    ttl_ms: i64,
) -> i64 {
    if requested_qty <= 0 {
        return 0;
    }
    let epcs = presence.present_epcs_of_sku(source_location_id, sku_id, now, ttl_ms);
    let moving: Vec<String> = epcs.into_iter().take(requested_qty as usize).collect();
    for epc in &moving {
        presence.record_read(epc, sku_id, dest_location_id, dest_primary_antenna_id, now, None);
    }
    moving.len() as i64
}

/// Debit the source ledger and credit the destination ledger by the same,
/// capped, amount.
pub fn move_internal_non_rfid(
    source_location_id: &str,
    dest_location_id: &str,
    sku_id: &str,
    requested_qty: i64,
    now: i64,
    ledger: &mut Ledger,
) -> i64 {
    let available = ledger.quantity(source_location_id, sku_id);
    let moved = requested_qty.min(available).max(0);
    if moved > 0 {
        ledger.append(
            source_location_id,
            sku_id,
            -moved,
            now,
            LedgerEntryKind::ConfirmedReplenishment,
        );
        ledger.append(
            dest_location_id,
            sku_id,
            moved,
            now,
            LedgerEntryKind::ConfirmedReplenishment,
        );
    }
    moved
}

/// Mint `requested_qty` new EPCs for a shipment from an external source,
/// register their mapping from the confirm timestamp, and place them at the
/// destination's primary antenna. Always moves the full requested amount.
pub fn receive_external_rfid(
    dest_location_id: &str,
    dest_primary_antenna_id: &str,
    sku_id: &str,
    requested_qty: i64,
    now: i64,
    presence: &mut PresenceStore,
    mappings: &mut EpcMappingStore,
) -> i64 {
    if requested_qty <= 0 {
        return 0;
    }
    for _ in 0..requested_qty {
        let epc = util::new_synthetic_epc();
        mappings.register(&epc, sku_id, now);
        presence.record_read(&epc, sku_id, dest_location_id, dest_primary_antenna_id, now, None);
    }
    requested_qty
}

/// Credit the destination ledger from an external source. Always moves the
/// full requested amount.
pub fn receive_external_non_rfid(
    dest_location_id: &str,
    sku_id: &str,
    requested_qty: i64,
    now: i64,
    ledger: &mut Ledger,
) -> i64 {
    if requested_qty <= 0 {
        return 0;
    }
    ledger.append(
        dest_location_id,
        sku_id,
        requested_qty,
        now,
        LedgerEntryKind::ConfirmedReplenishment,
    );
    requested_qty
}
