//! Customer cart: reservation, pending-pick reconciliation, and checkout —
//! including the personalisation detour through cashier storage.

use crate::catalog::CatalogStore;
use crate::ledger::LedgerEntryKind;
use crate::locations::SkuStore;
use crate::planner::reserved_from_source;
use crate::presence::PresenceStore;
use crate::sales;
use crate::snapshot::SnapshotStore;
use crate::tasks::TaskStore;
use shared::models::{
    BasketItem, BasketItemStatus, Location, PendingPick, ReplenishmentTask, SourceCandidate,
    StockSource, TaskStatus,
};
use shared::util;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct BasketStore {
    items: HashMap<String, BasketItem>,
}

impl BasketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&BasketItem> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut BasketItem> {
        self.items.get_mut(id)
    }

    pub fn insert(&mut self, item: BasketItem) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn in_cart_for(&self, location_id: &str, sku_id: &str) -> Vec<&BasketItem> {
        self.items
            .values()
            .filter(|i| {
                i.status == BasketItemStatus::InCart
                    && i.location_id == location_id
                    && i.sku_id == sku_id
            })
            .collect()
    }

    pub fn for_customer(&self, customer_id: &str) -> Vec<&BasketItem> {
        let mut items: Vec<&BasketItem> = self
            .items
            .values()
            .filter(|i| i.customer_id == customer_id && i.status == BasketItemStatus::InCart)
            .collect();
        items.sort_by_key(|i| i.created_at);
        items
    }
}

#[derive(Debug, Default)]
pub struct PendingPickStore {
    picks: HashMap<String, PendingPick>,
}

impl PendingPickStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pick: PendingPick) {
        self.picks.insert(pick.basket_item_id.clone(), pick);
    }

    pub fn get(&self, basket_item_id: &str) -> Option<&PendingPick> {
        self.picks.get(basket_item_id)
    }

    pub fn remove(&mut self, basket_item_id: &str) -> Option<PendingPick> {
        self.picks.remove(basket_item_id)
    }

    fn open_for(&mut self, location_id: &str, sku_id: &str) -> Vec<&mut PendingPick> {
        self.picks
            .values_mut()
            .filter(|p| p.location_id == location_id && p.sku_id == sku_id && p.qty_remaining > 0)
            .collect()
    }
}

/// Units reserved against a `(location, sku)` by every `IN_CART` item:
/// RFID reserves only what hasn't been physically confirmed yet, NON_RFID
/// reserves the whole requested quantity (there's nothing to confirm).
pub fn reserved_qty(
    baskets: &BasketStore,
    location_id: &str,
    sku_id: &str,
    source: StockSource,
) -> i64 {
    baskets
        .in_cart_for(location_id, sku_id)
        .iter()
        .map(|item| match source {
            StockSource::Rfid => (item.qty - item.picked_confirmed_qty).max(0),
            StockSource::NonRfid => item.qty,
        })
        .sum()
}

pub enum AddItemError {
    NotASalesLocation,
    InsufficientStock,
}

/// Reserve `qty` units of `sku_id` for `customer_id` at `location_id`.
pub fn add_item(
    location: &Location,
    customer_id: &str,
    sku_id: &str,
    source: StockSource,
    qty: i64,
    now: i64,
    baskets: &mut BasketStore,
    pending_picks: &mut PendingPickStore,
    snapshots: &SnapshotStore,
) -> Result<String, AddItemError> {
    if !location.is_sales_location {
        return Err(AddItemError::NotASalesLocation);
    }
    let current = snapshots.qty(&location.id, sku_id, source);
    let reserved = reserved_qty(baskets, &location.id, sku_id, source);
    let available = current - reserved;
    if available < qty {
        return Err(AddItemError::InsufficientStock);
    }

    let id = util::new_id("basket-item");
    baskets.insert(BasketItem {
        id: id.clone(),
        customer_id: customer_id.to_string(),
        location_id: location.id.clone(),
        sku_id: sku_id.to_string(),
        qty,
        picked_confirmed_qty: 0,
        status: BasketItemStatus::InCart,
        created_at: now,
    });
    if source == StockSource::Rfid {
        pending_picks.insert(PendingPick {
            basket_item_id: id.clone(),
            sku_id: sku_id.to_string(),
            location_id: location.id.clone(),
            qty_remaining: qty,
            consumed_epcs: Vec::new(),
        });
    }
    Ok(id)
}

/// Invoked after every accepted RFID read in a location: reconcile any
/// still-open pending pick for that SKU against the tags now present,
/// oldest-seen first, completing picks as their remaining quantity hits
/// zero.
pub fn resolve_pending_picks(
    location_id: &str,
    sku_id: &str,
    now: i64,
    ttl_ms: i64,
    presence: &mut PresenceStore,
    pending_picks: &mut PendingPickStore,
    baskets: &mut BasketStore,
) {
    let mut item_ids: Vec<String> = pending_picks
        .open_for(location_id, sku_id)
        .iter()
        .map(|p| p.basket_item_id.clone())
        .collect();
    item_ids.sort();
    for item_id in item_ids {
        let Some(pick) = pending_picks.picks.get_mut(&item_id) else {
            continue;
        };
        let epcs = presence.present_epcs_of_sku(location_id, sku_id, now, ttl_ms);
        let take = (pick.qty_remaining as usize).min(epcs.len());
        for epc in epcs.into_iter().take(take) {
            presence.remove(&epc);
            pick.consumed_epcs.push(epc);
        }
        pick.qty_remaining -= take as i64;
        if let Some(item) = baskets.get_mut(&item_id) {
            item.picked_confirmed_qty += take as i64;
        }
        // A completed pick stays in the store (just invisible to `open_for`,
        // which filters on `qty_remaining > 0`) so checkout/removal can still
        // retrieve its `consumed_epcs`.
    }
}

/// Un-reserve a basket item. RFID units already physically picked are
/// re-materialised at the original location; any shortfall between
/// `picked_confirmed_qty` and what the (possibly already-completed) pending
/// pick recorded is synthesised as new EPCs to keep the count honest.
pub fn remove_item(
    item_id: &str,
    now: i64,
    primary_antenna_id: Option<&str>,
    baskets: &mut BasketStore,
    pending_picks: &mut PendingPickStore,
    presence: &mut PresenceStore,
) {
    let Some(item) = baskets.get_mut(item_id) else {
        return;
    };
    item.status = BasketItemStatus::Removed;
    let location_id = item.location_id.clone();
    let sku_id = item.sku_id.clone();
    let picked = item.picked_confirmed_qty;

    let consumed = pending_picks
        .remove(item_id)
        .map(|p| p.consumed_epcs)
        .unwrap_or_default();

    let Some(antenna_id) = primary_antenna_id else {
        return;
    };
    for epc in &consumed {
        presence.record_read(epc, &sku_id, &location_id, antenna_id, now, None);
    }
    let shortfall = picked - consumed.len() as i64;
    for _ in 0..shortfall.max(0) {
        let epc = util::new_synthetic_epc();
        presence.record_read(&epc, &sku_id, &location_id, antenna_id, now, None);
    }
}

/// `on_hand + open inbound deficit + reachable supply from every configured
/// source`, used to decide where a personalised item's replacement demand
/// should land.
pub fn projected_supply(
    location: &Location,
    sku_id: &str,
    source: StockSource,
    snapshots: &SnapshotStore,
    tasks: &TaskStore,
) -> i64 {
    let on_hand = snapshots.qty(&location.id, sku_id, source);
    let rule_id = util::rule_id(&location.id, sku_id, source.as_str());
    let open_inbound_deficit: i64 = tasks
        .open_for_rule(&rule_id)
        .iter()
        .map(|t| t.deficit_qty)
        .sum();
    let reachable: i64 = location
        .sources
        .iter()
        .map(|src| {
            let on_hand = snapshots.qty(src, sku_id, source);
            let reserved = reserved_from_source(tasks, src, sku_id, source, "");
            (on_hand - reserved).max(0)
        })
        .sum();
    on_hand + open_inbound_deficit + reachable
}

pub struct CheckoutOutcome {
    pub personalised: bool,
    pub replacement_task_id: Option<String>,
}

/// Checkout one `IN_CART` item: personalisable SKUs route through cashier
/// storage and spin off a replacement task; everything else is a direct
/// sale.
#[allow(clippy::too_many_arguments)]
pub fn checkout_item(
    item_id: &str,
    now: i64,
    ttl_ms: i64,
    cashier_antenna_id: Option<&str>,
    baskets: &mut BasketStore,
    pending_picks: &mut PendingPickStore,
    presence: &mut PresenceStore,
    catalog: &CatalogStore,
    skus: &SkuStore,
    locations: &HashMap<String, Location>,
    ledger: &mut crate::ledger::Ledger,
    snapshots: &mut SnapshotStore,
    tasks: &mut TaskStore,
) -> Option<CheckoutOutcome> {
    let item = baskets.get(item_id)?.clone();
    let source = skus.get(&item.sku_id)?.source;
    let personalised = catalog.is_personalisable(&item.sku_id);

    if !personalised {
        sales::apply_movement(
            &item.location_id,
            &item.sku_id,
            source,
            LedgerEntryKind::Sale,
            item.qty,
            now,
            presence,
            ledger,
            snapshots,
            ttl_ms,
        );
        pending_picks.remove(item_id);
        if let Some(i) = baskets.get_mut(item_id) {
            i.status = BasketItemStatus::Sold;
        }
        return Some(CheckoutOutcome {
            personalised: false,
            replacement_task_id: None,
        });
    }

    // Personalisable: the physical unit(s) route through cashier storage
    // rather than leaving stock outright.
    if let Some(pick) = pending_picks.remove(item_id) {
        if let Some(antenna_id) = cashier_antenna_id {
            for epc in &pick.consumed_epcs {
                presence.record_read(
                    epc,
                    &item.sku_id,
                    util::CASHIER_STORAGE_LOCATION_ID,
                    antenna_id,
                    now,
                    None,
                );
            }
        }
    }
    if let Some(i) = baskets.get_mut(item_id) {
        i.status = BasketItemStatus::Sold;
    }

    let origin = locations.get(&item.location_id);
    let origin_supply = origin
        .map(|loc| projected_supply(loc, &item.sku_id, source, snapshots, tasks))
        .unwrap_or(0);
    let target_location_id = if origin_supply > 0 {
        item.location_id.clone()
    } else {
        util::PRINTING_WALL_LOCATION_ID.to_string()
    };

    let task = ReplenishmentTask {
        id: util::new_id("task"),
        rule_id: util::rule_id(&target_location_id, &item.sku_id, source.as_str()),
        destination_location_id: target_location_id,
        sku_id: item.sku_id.clone(),
        source,
        candidate_sources: Vec::<SourceCandidate>::new(),
        selected_source_zone_id: None,
        status: TaskStatus::Created,
        trigger_qty: item.qty,
        deficit_qty: item.qty,
        target_qty: item.qty,
        assigned_staff_id: None,
        assigned_at: None,
        confirmed_qty: None,
        confirmed_by: None,
        close_reason: None,
        created_at: now,
        updated_at: now,
        attempted_source_ids: Vec::new(),
    };
    let task_id = task.id.clone();
    tasks.insert(task);

    Some(CheckoutOutcome {
        personalised: true,
        replacement_task_id: Some(task_id),
    })
}
