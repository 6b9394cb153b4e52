//! EPC → SKU mapping history.

use shared::models::EpcMapping;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct EpcMappingStore {
    mappings: HashMap<String, Vec<EpcMapping>>,
}

impl EpcMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, epc: &str, sku_id: &str, active_from: i64) {
        self.mappings
            .entry(epc.to_string())
            .or_default()
            .push(EpcMapping {
                epc: epc.to_string(),
                sku_id: sku_id.to_string(),
                active_from,
                active_to: None,
            });
    }

    pub fn sku_of(&self, epc: &str, t: i64) -> Option<&str> {
        self.mappings.get(epc)?.iter().find(|m| m.is_active_at(t)).map(|m| m.sku_id.as_str())
    }
}
