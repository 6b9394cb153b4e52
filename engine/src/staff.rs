//! Staff directory and round-robin auto-assignment.

use shared::models::{StaffMember, StaffRole, ZoneScope};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct StaffStore {
    members: HashMap<String, StaffMember>,
}

impl StaffStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&StaffMember> {
        self.members.get(id)
    }

    pub fn upsert(&mut self, member: StaffMember) {
        self.members.insert(member.id.clone(), member);
    }

    pub fn all(&self) -> impl Iterator<Item = &StaffMember> {
        self.members.values()
    }

    /// Active associates, falling back to every active member when no
    /// associate is on shift.
    fn eligible_pool(&self) -> Vec<&StaffMember> {
        let associates: Vec<&StaffMember> = self
            .members
            .values()
            .filter(|m| m.active && m.role == StaffRole::Associate)
            .collect();
        if !associates.is_empty() {
            return associates;
        }
        self.members.values().filter(|m| m.active).collect()
    }
}

/// One outstanding item waiting for a staff member: a task or a receiving
/// order, whichever the caller is reconciling.
pub struct PendingAssignment {
    pub id: String,
    pub location_id: String,
    pub created_at: i64,
}

pub struct Assignment {
    pub item_id: String,
    pub staff_id: String,
    pub used_fallback: bool,
}

/// Assign each pending item, in creation order, to the minimum-load eligible
/// staff member in scope of its location (falling back to the whole
/// eligible pool when no in-scope member exists). `current_load` must
/// return a member's open-task-plus-in-transit-order count as of the start
/// of this pass; load is tracked locally as assignments are made so two
/// items in the same batch don't collide on the same member.
pub fn assign_pending(
    staff: &StaffStore,
    mut pending: Vec<PendingAssignment>,
    current_load: impl Fn(&str) -> usize,
) -> Vec<Assignment> {
    pending.sort_by_key(|p| p.created_at);
    let pool = staff.eligible_pool();
    if pool.is_empty() {
        return Vec::new();
    }

    let mut load: HashMap<&str, usize> = pool
        .iter()
        .map(|m| (m.id.as_str(), current_load(&m.id)))
        .collect();

    let mut assignments = Vec::new();
    for item in &pending {
        let in_scope: Vec<&&StaffMember> = pool
            .iter()
            .filter(|m| m.zone_scope.covers(&item.location_id))
            .collect();
        let (subset, used_fallback): (Vec<&&StaffMember>, bool) = if in_scope.is_empty() {
            (pool.iter().collect(), true)
        } else {
            (in_scope, false)
        };

        let chosen = subset
            .into_iter()
            .min_by(|a, b| {
                let load_a = load[a.id.as_str()];
                let load_b = load[b.id.as_str()];
                load_a.cmp(&load_b).then_with(|| a.id.cmp(&b.id))
            })
            .map(|m| m.id.clone());

        if let Some(staff_id) = chosen {
            *load.get_mut(staff_id.as_str()).unwrap() += 1;
            assignments.push(Assignment {
                item_id: item.id.clone(),
                staff_id,
                used_fallback,
            });
        }
    }
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ZoneScope;

    fn member(id: &str, role: StaffRole, scope: ZoneScope) -> StaffMember {
        StaffMember {
            id: id.to_string(),
            name: id.to_string(),
            role,
            active: true,
            zone_scope: scope,
        }
    }

    #[test]
    fn picks_minimum_load_in_scope() {
        let mut staff = StaffStore::new();
        staff.upsert(member("alice", StaffRole::Associate, ZoneScope::All));
        staff.upsert(member("bob", StaffRole::Associate, ZoneScope::All));

        let pending = vec![PendingAssignment {
            id: "task-1".to_string(),
            location_id: "shelf-a".to_string(),
            created_at: 0,
        }];
        let assignments = assign_pending(&staff, pending, |id| if id == "alice" { 2 } else { 0 });
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].staff_id, "bob");
        assert!(!assignments[0].used_fallback);
    }

    #[test]
    fn falls_back_to_whole_pool_when_out_of_scope() {
        let mut staff = StaffStore::new();
        staff.upsert(member(
            "alice",
            StaffRole::Associate,
            ZoneScope::Locations {
                location_ids: vec!["shelf-b".to_string()],
            },
        ));

        let pending = vec![PendingAssignment {
            id: "task-1".to_string(),
            location_id: "shelf-a".to_string(),
            created_at: 0,
        }];
        let assignments = assign_pending(&staff, pending, |_| 0);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].staff_id, "alice");
        assert!(assignments[0].used_fallback);
    }

    #[test]
    fn ties_break_on_ascending_member_id() {
        let mut staff = StaffStore::new();
        staff.upsert(member("bob", StaffRole::Associate, ZoneScope::All));
        staff.upsert(member("alice", StaffRole::Associate, ZoneScope::All));

        let pending = vec![PendingAssignment {
            id: "task-1".to_string(),
            location_id: "shelf-a".to_string(),
            created_at: 0,
        }];
        let assignments = assign_pending(&staff, pending, |_| 0);
        assert_eq!(assignments[0].staff_id, "alice");
    }
}
