//! Non-sales (receiving) location evaluation: closes any task-based
//! replenishment machinery that slipped in and drives demand through
//! receiving orders instead.

use crate::receiving::ReceivingOrderStore;
use crate::snapshot::SnapshotStore;
use crate::tasks::TaskStore;
use shared::models::{AuditEntry, EffectiveRule, ReceivingOrder, ReceivingOrderStatus, TaskAction};
use shared::util;

fn pick_source(sources: &[String], snapshots: &SnapshotStore, sku_id: &str, source: shared::models::StockSource, desired: i64) -> Option<String> {
    let internal: Vec<&String> = sources.iter().filter(|s| !util::is_external_source(s)).collect();
    if let Some(s) = internal
        .iter()
        .find(|s| snapshots.qty(s, sku_id, source) >= desired)
    {
        return Some((*s).clone());
    }
    if let Some(s) = internal
        .iter()
        .find(|s| snapshots.qty(s, sku_id, source) > 0)
    {
        return Some((*s).clone());
    }
    if let Some(s) = sources.iter().find(|s| util::is_external_source(s)) {
        return Some(s.clone());
    }
    sources.first().cloned()
}

/// A non-sales location never works tasks: any task-based demand for its
/// rules is cancelled and replaced by a receiving order walk against its
/// configured sources.
pub fn evaluate_non_sales_rule(
    location_id: &str,
    sources: &[String],
    rule: &EffectiveRule,
    snapshots: &SnapshotStore,
    tasks: &mut TaskStore,
    receiving_orders: &mut ReceivingOrderStore,
    now: i64,
) -> (Vec<AuditEntry>, Option<String>) {
    let mut audit = Vec::new();

    for t in tasks.open_for_rule(&rule.id) {
        if t.status != shared::models::TaskStatus::InProgress {
            let id = t.id.clone();
            if let Some(entry) = tasks.close(&id, "non_sales_receiving_flow", now) {
                audit.push(entry);
            }
        }
    }

    let current = snapshots.qty(location_id, &rule.sku_id, rule.source);
    if current > rule.min {
        return (audit, None);
    }

    let desired = rule.max - current;
    let in_transit = receiving_orders.in_transit_qty(location_id, &rule.sku_id, rule.source);
    let remainder = desired - in_transit;
    if remainder <= 0 {
        return (audit, None);
    }

    let Some(source_id) = pick_source(sources, snapshots, &rule.sku_id, rule.source, remainder) else {
        return (audit, None);
    };

    let order = ReceivingOrder {
        id: util::new_id("recv"),
        source_location_id: source_id,
        destination_location_id: location_id.to_string(),
        sku_id: rule.sku_id.clone(),
        source: rule.source,
        requested_qty: remainder,
        confirmed_qty: None,
        status: ReceivingOrderStatus::InTransit,
        assigned_staff_id: None,
        created_at: now,
        updated_at: now,
    };
    let order_id = order.id.clone();
    receiving_orders.insert(order);
    audit.push(AuditEntry {
        id: util::new_id("audit"),
        task_id: order_id.clone(),
        action: TaskAction::Created,
        actor: "planner".to_string(),
        details: "receiving order triggered".to_string(),
        timestamp: now,
    });

    (audit, Some(order_id))
}
