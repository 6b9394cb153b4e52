//! Per-location recompute: RFID presence pass, NON_RFID ledger pass, then
//! min/max evaluation — followed by an engine-wide staff reconciliation
//! pass so newly created demand gets a staff member without a second
//! round-trip.

use crate::planner;
use crate::staff::{assign_pending, PendingAssignment};
use crate::state::EngineState;
use shared::models::{AuditEntry, StockSource, TaskAction};
use shared::util;

/// Recompute one location's snapshots and re-evaluate its active rules.
/// Returns every audit entry produced along the way.
pub fn recompute_location(state: &mut EngineState, location_id: &str) -> Vec<AuditEntry> {
    let mut audit = Vec::new();
    let now = state.clock.now();
    let ttl_ms = state.presence_ttl_ms();

    let rfid_rule_skus: Vec<String> = state
        .rules
        .for_location(location_id)
        .iter()
        .filter(|r| r.source == StockSource::Rfid)
        .map(|r| r.sku_id.clone())
        .collect();
    let existing_rfid_skus: Vec<String> = state
        .snapshots
        .for_location(location_id)
        .iter()
        .filter(|s| s.source == StockSource::Rfid)
        .map(|s| s.sku_id.clone())
        .collect();
    let mut rfid_skus: Vec<String> = state.presence.present_skus(location_id, now, ttl_ms);
    rfid_skus.extend(rfid_rule_skus);
    rfid_skus.extend(existing_rfid_skus);
    rfid_skus.sort();
    rfid_skus.dedup();

    for sku_id in &rfid_skus {
        let computed = state.presence.present_count(location_id, sku_id, now, ttl_ms);
        let existing = state.snapshots.get(location_id, sku_id, StockSource::Rfid).cloned();
        if let Some(existing) = &existing {
            if existing.provisional_floor && computed > existing.qty {
                state.snapshots.upsert(
                    location_id,
                    sku_id,
                    StockSource::Rfid,
                    existing.qty,
                    existing.confidence,
                    now,
                    true,
                );
                continue;
            }
        }
        let confidence = if computed > 0 { 0.9 } else { 0.7 };
        state
            .snapshots
            .upsert(location_id, sku_id, StockSource::Rfid, computed, Some(confidence), now, false);
    }

    let non_rfid_rule_skus: Vec<String> = state
        .rules
        .for_location(location_id)
        .iter()
        .filter(|r| r.source == StockSource::NonRfid)
        .map(|r| r.sku_id.clone())
        .collect();
    for sku_id in &non_rfid_rule_skus {
        let qty = state.ledger.quantity(location_id, sku_id);
        state
            .snapshots
            .upsert(location_id, sku_id, StockSource::NonRfid, qty, None, now, false);
    }

    let Some(location) = state.locations.get(location_id).cloned() else {
        return audit;
    };
    let rules = state.rules.for_location(location_id).into_iter().cloned().collect::<Vec<_>>();
    for rule in &rules {
        if location.is_sales_location {
            audit.extend(planner::evaluate_sales_rule(
                &location,
                rule,
                &state.snapshots,
                &mut state.tasks,
                now,
            ));
        } else {
            let (entries, _order_id) = planner::evaluate_non_sales_rule(
                &location.id,
                &location.sources,
                rule,
                &state.snapshots,
                &mut state.tasks,
                &mut state.receiving_orders,
                now,
            );
            audit.extend(entries);
        }
    }

    audit.extend(staff_reconcile(state, now));
    audit
}

/// Assign every unassigned open task and in-transit receiving order to the
/// minimum-load eligible staff member in scope, engine-wide.
pub fn staff_reconcile(state: &mut EngineState, now: i64) -> Vec<AuditEntry> {
    let mut pending: Vec<PendingAssignment> = state
        .tasks
        .unassigned_open()
        .into_iter()
        .map(|t| PendingAssignment {
            id: t.id.clone(),
            location_id: t.destination_location_id.clone(),
            created_at: t.created_at,
        })
        .collect();
    pending.extend(
        state
            .receiving_orders
            .unassigned_in_transit()
            .into_iter()
            .map(|o| PendingAssignment {
                id: o.id.clone(),
                location_id: o.destination_location_id.clone(),
                created_at: o.created_at,
            }),
    );
    if pending.is_empty() {
        return Vec::new();
    }

    let tasks = &state.tasks;
    let receiving_orders = &state.receiving_orders;
    let assignments = assign_pending(&state.staff, pending, |staff_id| {
        tasks.open_count_for_staff(staff_id) + receiving_orders.in_transit_count_for_staff(staff_id)
    });

    let mut audit = Vec::new();
    for a in assignments {
        if let Some(task) = state.tasks.get_mut(&a.item_id) {
            task.assigned_staff_id = Some(a.staff_id.clone());
            task.assigned_at = Some(now);
            task.status = shared::models::TaskStatus::Assigned;
            task.updated_at = now;
        } else if let Some(order) = state.receiving_orders.get_mut(&a.item_id) {
            order.assigned_staff_id = Some(a.staff_id.clone());
            order.updated_at = now;
        }
        audit.push(AuditEntry {
            id: util::new_id("audit"),
            task_id: a.item_id,
            action: TaskAction::Assigned,
            actor: a.staff_id,
            details: if a.used_fallback {
                "auto-assigned via zone-scope fallback".to_string()
            } else {
                "auto-assigned".to_string()
            },
            timestamp: now,
        });
    }
    audit
}
