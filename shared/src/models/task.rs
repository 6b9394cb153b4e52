//! Replenishment task model

use super::sku::StockSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Created,
    Assigned,
    InProgress,
    Confirmed,
    Rejected,
}

impl TaskStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Created | Self::Assigned | Self::InProgress)
    }

    pub fn is_auto_adjustable(&self) -> bool {
        matches!(self, Self::Created | Self::Assigned)
    }
}

/// A potential origin for a task's movement, scored by available qty and
/// configured sort order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceCandidate {
    pub zone_id: String,
    pub sort_order: i32,
    pub available_qty: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplenishmentTask {
    pub id: String,
    pub rule_id: String,
    pub destination_location_id: String,
    pub sku_id: String,
    pub source: StockSource,
    pub candidate_sources: Vec<SourceCandidate>,
    pub selected_source_zone_id: Option<String>,
    pub status: TaskStatus,
    pub trigger_qty: i64,
    pub deficit_qty: i64,
    pub target_qty: i64,
    pub assigned_staff_id: Option<String>,
    pub assigned_at: Option<i64>,
    pub confirmed_qty: Option<i64>,
    pub confirmed_by: Option<String>,
    pub close_reason: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Source ids already attempted during a confirm walk, so a retry does
    /// not re-select a source that yielded zero movement.
    #[serde(default)]
    pub attempted_source_ids: Vec<String>,
}
