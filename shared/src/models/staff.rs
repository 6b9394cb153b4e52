//! Staff model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Associate,
    Supervisor,
}

/// A location ids a staff member may be auto-assigned to, or unrestricted scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneScope {
    All,
    Locations { location_ids: Vec<String> },
}

impl ZoneScope {
    pub fn covers(&self, location_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Locations { location_ids } => location_ids.iter().any(|l| l == location_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    /// Whether this staff member is currently on shift / active.
    pub active: bool,
    pub zone_scope: ZoneScope,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub role: Option<StaffRole>,
    pub active: Option<bool>,
    pub zone_scope: Option<ZoneScope>,
}
