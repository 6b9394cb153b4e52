//! Read-model projections exposed to external collaborators (UI, map
//! editor, analytics dashboards...). These are defensive copies: mutating
//! them has no effect on engine state.

use super::super::models::{AuditEntry, ReceivingOrder, ReplenishmentTask};
use serde::{Deserialize, Serialize};

/// Per-location summary row for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardRow {
    pub location_id: String,
    pub location_name: String,
    pub low_stock_count: usize,
    pub open_task_count: usize,
}

/// One inventory row within a zone's detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRow {
    pub sku_id: String,
    pub source: String,
    pub qty: i64,
    pub confidence: Option<f64>,
    pub version: u64,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// A recent RFID read, for the zone detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentRead {
    pub epc: String,
    pub sku_id: String,
    pub antenna_id: String,
    pub timestamp: i64,
    pub rssi: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneDetail {
    pub location_id: String,
    pub inventory: Vec<InventoryRow>,
    pub recent_reads: Vec<RecentRead>,
    pub open_tasks: Vec<ReplenishmentTask>,
}

/// Filters accepted by the task-list read model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListFilter {
    pub location_id: Option<String>,
    pub status: Option<String>,
    pub sku_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResult {
    pub tasks: Vec<ReplenishmentTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivingListResult {
    pub orders: Vec<ReceivingOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogResult {
    pub entries: Vec<AuditEntry>,
}

/// One entry in the engine-wide flow timeline: every accepted command and
/// every state transition, surfaced for UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEvent {
    pub id: String,
    pub kind: String,
    pub summary: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowTimelineResult {
    pub events: Vec<FlowEvent>,
}
