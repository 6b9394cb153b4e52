//! Min/max evaluation for sales locations: merges, trims, and triggers
//! replenishment tasks against a location's active rules.

use crate::snapshot::SnapshotStore;
use crate::tasks::TaskStore;
use shared::models::{
    AuditEntry, EffectiveRule, Location, ReplenishmentTask, SourceCandidate, StockSource,
    TaskAction, TaskStatus,
};
use shared::util;

/// Sum of `other` open tasks' deficit reserved against `(source_location_id,
/// sku_id, source)`, excluding `excluding_task_id`. A source location can
/// feed several destinations, so reservations are tracked engine-wide, not
/// just within one rule.
pub(crate) fn reserved_from_source(
    tasks: &TaskStore,
    source_location_id: &str,
    sku_id: &str,
    source: StockSource,
    excluding_task_id: &str,
) -> i64 {
    tasks
        .all()
        .filter(|t| {
            t.status.is_open()
                && t.id != excluding_task_id
                && t.sku_id == sku_id
                && t.source == source
                && t.selected_source_zone_id.as_deref() == Some(source_location_id)
        })
        .map(|t| t.deficit_qty)
        .sum()
}

fn build_candidates(
    location: &Location,
    rule: &EffectiveRule,
    snapshots: &SnapshotStore,
    tasks: &TaskStore,
    excluding_task_id: &str,
) -> Vec<SourceCandidate> {
    location
        .sources
        .iter()
        .enumerate()
        .map(|(order, source_id)| {
            let on_hand = snapshots.qty(source_id, &rule.sku_id, rule.source);
            let reserved = reserved_from_source(
                tasks,
                source_id,
                &rule.sku_id,
                rule.source,
                excluding_task_id,
            );
            SourceCandidate {
                zone_id: source_id.clone(),
                sort_order: order as i32,
                available_qty: (on_hand - reserved).max(0),
            }
        })
        .collect()
}

fn new_task(
    rule: &EffectiveRule,
    location_id: &str,
    candidates: Vec<SourceCandidate>,
    selected: Option<String>,
    alloc_qty: i64,
    now: i64,
) -> ReplenishmentTask {
    ReplenishmentTask {
        id: util::new_id("task"),
        rule_id: rule.id.clone(),
        destination_location_id: location_id.to_string(),
        sku_id: rule.sku_id.clone(),
        source: rule.source,
        candidate_sources: candidates,
        selected_source_zone_id: selected,
        status: TaskStatus::Created,
        trigger_qty: alloc_qty,
        deficit_qty: alloc_qty,
        target_qty: alloc_qty,
        assigned_staff_id: None,
        assigned_at: None,
        confirmed_qty: None,
        confirmed_by: None,
        close_reason: None,
        created_at: now,
        updated_at: now,
        attempted_source_ids: Vec::new(),
    }
}

fn audit_created(task_id: &str, now: i64) -> AuditEntry {
    AuditEntry {
        id: util::new_id("audit"),
        task_id: task_id.to_string(),
        action: TaskAction::Created,
        actor: "planner".to_string(),
        details: "replenishment task triggered".to_string(),
        timestamp: now,
    }
}

/// Evaluate one active rule against its sales location: merge redundant
/// tasks, reconcile to current stock, refresh source candidates, and
/// trigger new demand. Returns audit entries for every mutation.
pub fn evaluate_sales_rule(
    location: &Location,
    rule: &EffectiveRule,
    snapshots: &SnapshotStore,
    tasks: &mut TaskStore,
    now: i64,
) -> Vec<AuditEntry> {
    let mut audit = Vec::new();
    let current = snapshots.qty(&location.id, &rule.sku_id, rule.source);

    // Merge: collapse redundant auto-adjustable demand into the oldest task
    // when the destination has nowhere else to pull from, or every open
    // task already agrees on a source.
    let auto_adjustable_ids: Vec<String> = tasks
        .auto_adjustable_for_rule(&rule.id)
        .iter()
        .map(|t| t.id.clone())
        .collect();
    if auto_adjustable_ids.len() > 1 {
        let single_destination_source = location.sources.len() <= 1;
        let same_source = {
            let mut sources = tasks
                .auto_adjustable_for_rule(&rule.id)
                .into_iter()
                .map(|t| t.selected_source_zone_id.clone());
            let first = sources.next().flatten();
            first.is_some() && sources.all(|s| s == first)
        };
        if single_destination_source || same_source {
            let (oldest_id, rest_ids) = auto_adjustable_ids.split_first().unwrap();
            let oldest_id = oldest_id.clone();
            let mut merged_deficit = 0;
            for id in rest_ids {
                if let Some(t) = tasks.get(id) {
                    merged_deficit += t.deficit_qty;
                }
                if let Some(entry) = tasks.close(id, "merged_plan", now) {
                    audit.push(entry);
                }
            }
            if let Some(oldest) = tasks.get_mut(&oldest_id) {
                oldest.deficit_qty += merged_deficit;
                oldest.target_qty += merged_deficit;
                oldest.updated_at = now;
            }
        }
    }

    // Over-stock: demand has already been satisfied (by a confirm, a
    // return, or a direct recount) — drop every task that hasn't started.
    if current >= rule.max {
        for t in tasks.auto_adjustable_for_rule(&rule.id) {
            let id = t.id.clone();
            if let Some(entry) = tasks.close(&id, "stock_recovered", now) {
                audit.push(entry);
            }
        }
    }

    // Trim: shrink outstanding demand down to what's actually still needed.
    let desired = (rule.max - current).max(0);
    let open_deficit_sum: i64 = tasks
        .open_for_rule(&rule.id)
        .iter()
        .map(|t| t.deficit_qty)
        .sum();
    if open_deficit_sum > desired {
        let mut excess = open_deficit_sum - desired;
        let mut auto_adjustable = tasks.auto_adjustable_for_rule(&rule.id);
        auto_adjustable.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let ids: Vec<String> = auto_adjustable.iter().map(|t| t.id.clone()).collect();
        for id in ids {
            if excess <= 0 {
                break;
            }
            let deficit = tasks.get(&id).map(|t| t.deficit_qty).unwrap_or(0);
            if deficit <= excess {
                excess -= deficit;
                if let Some(entry) = tasks.close(&id, "plan_adjusted", now) {
                    audit.push(entry);
                }
            } else if let Some(t) = tasks.get_mut(&id) {
                t.deficit_qty -= excess;
                t.target_qty -= excess;
                t.updated_at = now;
                excess = 0;
            }
        }
    }

    // Source refresh: every open task's candidate list and selection must
    // reflect current availability, not what was true when it was created.
    let open_ids: Vec<String> = tasks
        .open_for_rule(&rule.id)
        .iter()
        .map(|t| t.id.clone())
        .collect();
    for id in &open_ids {
        let candidates = build_candidates(location, rule, snapshots, tasks, id);
        if let Some(t) = tasks.get_mut(id) {
            let still_present = t
                .selected_source_zone_id
                .as_ref()
                .is_some_and(|z| candidates.iter().any(|c| &c.zone_id == z));
            if !still_present {
                t.selected_source_zone_id = None;
            }
            t.candidate_sources = candidates;
            t.updated_at = now;
        }
    }

    // Trigger: open new demand when stock has fallen to or below the floor
    // and existing open tasks don't already cover it.
    let open_deficit_sum: i64 = tasks
        .open_for_rule(&rule.id)
        .iter()
        .map(|t| t.deficit_qty)
        .sum();
    let remaining = desired - open_deficit_sum;
    if current <= rule.min && remaining > 0 {
        let candidates = build_candidates(location, rule, snapshots, tasks, "");
        let mut remaining = remaining;
        let mut any_created = false;
        for candidate in candidates.iter().filter(|c| c.available_qty > 0) {
            if remaining <= 0 {
                break;
            }
            let alloc = remaining.min(candidate.available_qty);
            let task = new_task(
                rule,
                &location.id,
                candidates.clone(),
                Some(candidate.zone_id.clone()),
                alloc,
                now,
            );
            audit.push(audit_created(&task.id, now));
            tasks.insert(task);
            remaining -= alloc;
            any_created = true;
        }
        if !any_created {
            if let Some(first) = candidates.first() {
                let task = new_task(
                    rule,
                    &location.id,
                    candidates.clone(),
                    Some(first.zone_id.clone()),
                    remaining,
                    now,
                );
                audit.push(audit_created(&task.id, now));
                tasks.insert(task);
            }
        }
    }

    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StockSource;

    fn rule(location_id: &str, min: i64, max: i64) -> EffectiveRule {
        EffectiveRule {
            id: util::rule_id(location_id, "SKU-1", "RFID"),
            location_id: location_id.to_string(),
            sku_id: "SKU-1".to_string(),
            source: StockSource::Rfid,
            min,
            max,
            priority: 0,
            inbound_source_id: None,
            active: true,
            updated_at: 0,
            owning_template_id: "tpl".to_string(),
        }
    }

    #[test]
    fn triggers_a_task_when_stock_falls_to_min() {
        let mut location = Location::new("shelf-a", "Shelf A", true);
        location.sources = vec!["back-room".to_string()];
        let rule = rule("shelf-a", 2, 10);
        let mut snapshots = SnapshotStore::new();
        snapshots.upsert("shelf-a", "SKU-1", StockSource::Rfid, 1, Some(0.9), 0, false);
        snapshots.upsert("back-room", "SKU-1", StockSource::Rfid, 20, Some(0.9), 0, false);
        let mut tasks = TaskStore::new();

        let audit = evaluate_sales_rule(&location, &rule, &snapshots, &mut tasks, 100);

        assert_eq!(audit.len(), 1);
        let created = tasks.open_for_rule(&rule.id);
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].deficit_qty, 9);
        assert_eq!(created[0].selected_source_zone_id.as_deref(), Some("back-room"));
    }

    #[test]
    fn over_stock_closes_open_tasks() {
        let location = Location::new("shelf-a", "Shelf A", true);
        let rule = rule("shelf-a", 2, 10);
        let mut snapshots = SnapshotStore::new();
        snapshots.upsert("shelf-a", "SKU-1", StockSource::Rfid, 12, Some(0.9), 0, false);
        let mut tasks = TaskStore::new();
        tasks.insert(new_task(&rule, "shelf-a", vec![], None, 5, 0));

        let audit = evaluate_sales_rule(&location, &rule, &snapshots, &mut tasks, 50);
        assert_eq!(audit.len(), 1);
        assert!(tasks.open_for_rule(&rule.id).is_empty());
    }

    #[test]
    fn trim_shrinks_excess_deficit_newest_first() {
        let location = Location::new("shelf-a", "Shelf A", true);
        let rule = rule("shelf-a", 0, 10);
        let mut snapshots = SnapshotStore::new();
        snapshots.upsert("shelf-a", "SKU-1", StockSource::Rfid, 5, Some(0.9), 0, false);
        let mut tasks = TaskStore::new();
        let mut older = new_task(&rule, "shelf-a", vec![], None, 3, 0);
        older.id = "task-older".to_string();
        older.created_at = 0;
        let mut newer = new_task(&rule, "shelf-a", vec![], None, 4, 10);
        newer.id = "task-newer".to_string();
        newer.created_at = 10;
        tasks.insert(older);
        tasks.insert(newer);

        evaluate_sales_rule(&location, &rule, &snapshots, &mut tasks, 100);

        // desired = 10 - 5 = 5; open deficit sum was 7, excess 2 trimmed from
        // the newer task first.
        let remaining = tasks.open_for_rule(&rule.id);
        assert_eq!(remaining.len(), 2);
        let newer_after = tasks.get("task-newer").unwrap();
        assert_eq!(newer_after.deficit_qty, 2);
    }
}
