//! Read-model builders: defensive-copy projections of engine state for
//! external collaborators (UI, map editor, analytics).

use crate::engine::Engine;
use shared::inventory::{
    AuditLogResult, DashboardRow, FlowTimelineResult, InventoryRow, ReceivingListResult,
    RecentRead, TaskListFilter, TaskListResult, ZoneDetail,
};

impl Engine {
    pub fn dashboard(&self) -> Vec<DashboardRow> {
        let state = self.state_lock();
        let mut rows: Vec<DashboardRow> = state
            .locations
            .all()
            .map(|location| {
                let low_stock_count = state
                    .rules
                    .for_location(&location.id)
                    .iter()
                    .filter(|r| state.snapshots.qty(&location.id, &r.sku_id, r.source) <= r.min)
                    .count();
                let open_task_count = state
                    .tasks
                    .all()
                    .filter(|t| t.destination_location_id == location.id && t.status.is_open())
                    .count();
                DashboardRow {
                    location_id: location.id.clone(),
                    location_name: location.name.clone(),
                    low_stock_count,
                    open_task_count,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.location_id.cmp(&b.location_id));
        rows
    }

    pub fn zone_detail(&self, location_id: &str) -> Option<ZoneDetail> {
        let state = self.state_lock();
        state.locations.get(location_id)?;

        let mut inventory: Vec<InventoryRow> = state
            .snapshots
            .for_location(location_id)
            .iter()
            .map(|s| {
                let rule = state.rules.find(location_id, &s.sku_id, s.source);
                InventoryRow {
                    sku_id: s.sku_id.clone(),
                    source: s.source.as_str().to_string(),
                    qty: s.qty,
                    confidence: s.confidence,
                    version: s.version,
                    min: rule.map(|r| r.min),
                    max: rule.map(|r| r.max),
                }
            })
            .collect();
        inventory.sort_by(|a, b| (a.sku_id.as_str(), a.source.as_str()).cmp(&(b.sku_id.as_str(), b.source.as_str())));

        let ttl_ms = state.presence_ttl_ms();
        let now = state.clock.now();
        let mut recent_reads: Vec<RecentRead> = state
            .presence
            .for_location(location_id, now, ttl_ms)
            .into_iter()
            .map(|r| RecentRead {
                epc: r.epc.clone(),
                sku_id: r.sku_id.clone(),
                antenna_id: r.antenna_id.clone(),
                timestamp: r.last_seen_at,
                rssi: r.rssi,
            })
            .collect();
        recent_reads.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut open_tasks: Vec<_> = state
            .tasks
            .all()
            .filter(|t| t.destination_location_id == location_id && t.status.is_open())
            .cloned()
            .collect();
        open_tasks.sort_by_key(|t| t.created_at);

        Some(ZoneDetail {
            location_id: location_id.to_string(),
            inventory,
            recent_reads,
            open_tasks,
        })
    }

    pub fn list_tasks(&self, filter: &TaskListFilter) -> TaskListResult {
        let state = self.state_lock();
        let mut tasks: Vec<_> = state
            .tasks
            .all()
            .filter(|t| {
                filter.location_id.as_deref().is_none_or(|l| t.destination_location_id == l)
                    && filter.sku_id.as_deref().is_none_or(|s| t.sku_id == s)
                    && filter
                        .status
                        .as_deref()
                        .is_none_or(|s| task_status_matches(t.status, s))
            })
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        TaskListResult { tasks }
    }

    pub fn list_receiving_orders(&self) -> ReceivingListResult {
        let state = self.state_lock();
        let mut orders: Vec<_> = state.receiving_orders.all().cloned().collect();
        orders.sort_by_key(|o| o.created_at);
        ReceivingListResult { orders }
    }

    pub fn audit_log(&self) -> AuditLogResult {
        let state = self.state_lock();
        let mut entries = state.audit_log.clone();
        entries.sort_by_key(|e| e.timestamp);
        AuditLogResult { entries }
    }

    pub fn flow_timeline(&self) -> FlowTimelineResult {
        let state = self.state_lock();
        let mut events = state.flow_timeline.clone();
        events.sort_by_key(|e| e.timestamp);
        FlowTimelineResult { events }
    }
}

fn task_status_matches(status: shared::models::TaskStatus, filter: &str) -> bool {
    use shared::models::TaskStatus::*;
    matches!(
        (status, filter),
        (Created, "created")
            | (Assigned, "assigned")
            | (InProgress, "in_progress")
            | (Confirmed, "confirmed")
            | (Rejected, "rejected")
    )
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;
    use shared::inventory::TaskListFilter;
    use shared::models::{Location, LocationCreate, StockSource, TaskStatus};

    fn seed_location(engine: &Engine, id: &str) {
        engine.create_location(LocationCreate {
            id: id.to_string(),
            name: id.to_string(),
            polygon: Vec::new(),
            color: "#cccccc".to_string(),
            is_sales_location: true,
            sources: Vec::new(),
        });
    }

    #[test]
    fn dashboard_lists_locations_sorted_with_counts() {
        let engine = Engine::new();
        seed_location(&engine, "shelf-b");
        seed_location(&engine, "shelf-a");
        let rows = engine.dashboard();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].location_id, "shelf-a");
        assert_eq!(rows[1].location_id, "shelf-b");
        assert_eq!(rows[0].open_task_count, 0);
    }

    #[test]
    fn zone_detail_returns_none_for_unknown_zone() {
        let engine = Engine::new();
        assert!(engine.zone_detail("shelf-ghost").is_none());
    }

    #[test]
    fn zone_detail_reports_inventory_and_open_tasks() {
        let engine = Engine::new();
        seed_location(&engine, "shelf-a");
        {
            let mut state = engine.state_lock();
            state.snapshots.upsert("shelf-a", "sku-1", StockSource::NonRfid, 5, None, 0, false);
        }
        let detail = engine.zone_detail("shelf-a").expect("zone exists");
        assert_eq!(detail.location_id, "shelf-a");
        assert_eq!(detail.inventory.len(), 1);
        assert_eq!(detail.inventory[0].sku_id, "sku-1");
        assert_eq!(detail.inventory[0].qty, 5);
        assert!(detail.open_tasks.is_empty());
    }

    fn dummy_task(id: &str, destination: &str, status: TaskStatus, created_at: i64) -> shared::models::ReplenishmentTask {
        shared::models::ReplenishmentTask {
            id: id.to_string(),
            rule_id: shared::util::rule_id(destination, "sku-1", "NON_RFID"),
            destination_location_id: destination.to_string(),
            sku_id: "sku-1".to_string(),
            source: StockSource::NonRfid,
            candidate_sources: Vec::new(),
            selected_source_zone_id: None,
            status,
            trigger_qty: 1,
            deficit_qty: 1,
            target_qty: 1,
            assigned_staff_id: None,
            assigned_at: None,
            confirmed_qty: None,
            confirmed_by: None,
            close_reason: None,
            created_at,
            updated_at: created_at,
            attempted_source_ids: Vec::new(),
        }
    }

    #[test]
    fn list_tasks_filters_by_location_sku_and_status() {
        let engine = Engine::new();
        {
            let mut state = engine.state_lock();
            state.locations.upsert(Location::new("shelf-a", "Shelf A", true));
            state.locations.upsert(Location::new("shelf-b", "Shelf B", true));
            state.tasks.insert(dummy_task("task-1", "shelf-a", TaskStatus::Created, 5));
            state.tasks.insert(dummy_task("task-2", "shelf-b", TaskStatus::Confirmed, 1));
        }

        let all = engine.list_tasks(&TaskListFilter::default());
        assert_eq!(all.tasks.len(), 2);
        assert_eq!(all.tasks[0].id, "task-2", "sorted by created_at ascending");

        let by_location = engine.list_tasks(&TaskListFilter {
            location_id: Some("shelf-a".to_string()),
            ..Default::default()
        });
        assert_eq!(by_location.tasks.len(), 1);
        assert_eq!(by_location.tasks[0].id, "task-1");

        let by_status = engine.list_tasks(&TaskListFilter {
            status: Some("confirmed".to_string()),
            ..Default::default()
        });
        assert_eq!(by_status.tasks.len(), 1);
        assert_eq!(by_status.tasks[0].id, "task-2");
    }

    #[test]
    fn audit_log_and_flow_timeline_are_chronological() {
        let engine = Engine::new();
        seed_location(&engine, "shelf-a");
        engine.ingest_sales_event("shelf-a", "sku-1", false, 1, 10);
        engine.ingest_sales_event("shelf-a", "sku-1", false, 1, 5);
        let flow = engine.flow_timeline();
        assert!(flow.events.len() >= 2);
        assert!(flow.events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        let audit = engine.audit_log();
        assert!(audit.entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn list_receiving_orders_sorted_by_creation() {
        let engine = Engine::new();
        seed_location(&engine, "shelf-a");
        engine.state_lock().skus.upsert(shared::models::Sku {
            id: "sku-1".to_string(),
            source: StockSource::NonRfid,
        });
        engine.create_receiving_order("shelf-a", "external-warehouse", "sku-1", 2, 5);
        engine.create_receiving_order("shelf-a", "external-warehouse", "sku-1", 3, 1);
        let result = engine.list_receiving_orders();
        assert_eq!(result.orders.len(), 2);
        assert!(result.orders[0].created_at <= result.orders[1].created_at);
    }
}
