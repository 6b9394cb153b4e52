//! Audit trail model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskAction {
    Created,
    Assigned,
    Started,
    Confirmed,
    Closed,
    Cancelled,
}

/// One audit entry against a task or receiving order, emitted on every
/// state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub task_id: String,
    pub action: TaskAction,
    pub actor: String,
    pub details: String,
    pub timestamp: i64,
}
