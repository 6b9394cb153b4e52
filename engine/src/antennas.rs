//! Antenna registry: fixed hardware bound to exactly one location.

use shared::models::Antenna;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct AntennaStore {
    antennas: HashMap<String, Antenna>,
}

impl AntennaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Antenna> {
        self.antennas.get(id)
    }

    pub fn upsert(&mut self, antenna: Antenna) {
        self.antennas.insert(antenna.id.clone(), antenna);
    }

    pub fn location_of(&self, antenna_id: &str) -> Option<&str> {
        self.antennas.get(antenna_id).map(|a| a.location_id.as_str())
    }

    /// The antenna registered first against a location — where confirmed
    /// receipts and internal transfers re-bind incoming EPCs.
    pub fn primary_of(&self, location_id: &str) -> Option<&str> {
        self.antennas
            .values()
            .find(|a| a.location_id == location_id && a.is_primary)
            .map(|a| a.id.as_str())
    }
}
