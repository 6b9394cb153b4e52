//! Replenishment task storage and the small queries the planner and task
//! state machine need over it.

use shared::models::{AuditEntry, ReplenishmentTask, TaskAction, TaskStatus};
use shared::util;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: HashMap<String, ReplenishmentTask>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&ReplenishmentTask> {
        self.tasks.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ReplenishmentTask> {
        self.tasks.get_mut(id)
    }

    pub fn insert(&mut self, task: ReplenishmentTask) {
        self.tasks.insert(task.id.clone(), task);
    }

    /// Open tasks (`CREATED`/`ASSIGNED`/`IN_PROGRESS`) for a rule, in
    /// creation order.
    pub fn open_for_rule(&self, rule_id: &str) -> Vec<&ReplenishmentTask> {
        let mut tasks: Vec<&ReplenishmentTask> = self
            .tasks
            .values()
            .filter(|t| t.rule_id == rule_id && t.status.is_open())
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        tasks
    }

    pub fn auto_adjustable_for_rule(&self, rule_id: &str) -> Vec<&ReplenishmentTask> {
        self.open_for_rule(rule_id)
            .into_iter()
            .filter(|t| t.status.is_auto_adjustable())
            .collect()
    }

    /// Every open task assigned to `staff_id`, used by auto-assignment load
    /// counting.
    pub fn open_count_for_staff(&self, staff_id: &str) -> usize {
        self.tasks
            .values()
            .filter(|t| t.status.is_open() && t.assigned_staff_id.as_deref() == Some(staff_id))
            .count()
    }

    pub fn unassigned_open(&self) -> Vec<&ReplenishmentTask> {
        let mut tasks: Vec<&ReplenishmentTask> = self
            .tasks
            .values()
            .filter(|t| t.status == TaskStatus::Created && t.assigned_staff_id.is_none())
            .collect();
        tasks.sort_by_key(|t| t.created_at);
        tasks
    }

    pub fn close(&mut self, task_id: &str, reason: &str, now: i64) -> Option<AuditEntry> {
        let task = self.tasks.get_mut(task_id)?;
        task.status = TaskStatus::Rejected;
        task.close_reason = Some(reason.to_string());
        task.updated_at = now;
        Some(AuditEntry {
            id: util::new_id("audit"),
            task_id: task_id.to_string(),
            action: TaskAction::Closed,
            actor: "planner".to_string(),
            details: reason.to_string(),
            timestamp: now,
        })
    }

    pub fn all(&self) -> impl Iterator<Item = &ReplenishmentTask> {
        self.tasks.values()
    }
}
