//! Location and SKU registries.

use shared::models::{Location, Sku};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct LocationStore {
    locations: HashMap<String, Location>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Location> {
        self.locations.get_mut(id)
    }

    pub fn upsert(&mut self, location: Location) {
        self.locations.insert(location.id.clone(), location);
    }

    pub fn remove(&mut self, id: &str) -> Option<Location> {
        self.locations.remove(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }
}

#[derive(Debug, Default)]
pub struct SkuStore {
    skus: HashMap<String, Sku>,
}

impl SkuStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Sku> {
        self.skus.get(id)
    }

    pub fn upsert(&mut self, sku: Sku) {
        self.skus.insert(sku.id.clone(), sku);
    }

    pub fn all(&self) -> impl Iterator<Item = &Sku> {
        self.skus.values()
    }
}
