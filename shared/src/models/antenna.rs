//! Antenna model

use serde::{Deserialize, Serialize};

/// A fixed RFID antenna bound to exactly one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Antenna {
    pub id: String,
    pub location_id: String,
    /// True for the first antenna registered against a location.
    pub is_primary: bool,
}
