//! Effective rule registry: the live min/max records the replenishment
//! planner consults. Populated exclusively by template projection — direct
//! mutation is not exposed outside this module.

use shared::models::{EffectiveRule, StockSource};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, EffectiveRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&EffectiveRule> {
        self.rules.get(id)
    }

    pub fn find(
        &self,
        location_id: &str,
        sku_id: &str,
        source: StockSource,
    ) -> Option<&EffectiveRule> {
        let id = shared::util::rule_id(location_id, sku_id, source.as_str());
        self.rules.get(&id)
    }

    pub fn for_location(&self, location_id: &str) -> Vec<&EffectiveRule> {
        let mut rules: Vec<&EffectiveRule> = self
            .rules
            .values()
            .filter(|r| r.active && r.location_id == location_id)
            .collect();
        rules.sort_by(|a, b| a.id.cmp(&b.id));
        rules
    }

    pub fn owned_by_template(&self, template_id: &str) -> Vec<String> {
        self.rules
            .values()
            .filter(|r| r.owning_template_id == template_id)
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn all_ids(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    /// Replace the registry's full content with a freshly projected winner
    /// set, returning the ids that were dropped (no longer winners) so the
    /// caller can cascade task closure.
    pub fn replace_all(&mut self, winners: Vec<EffectiveRule>) -> Vec<String> {
        let new_ids: std::collections::HashSet<String> =
            winners.iter().map(|r| r.id.clone()).collect();
        let removed: Vec<String> = self
            .rules
            .keys()
            .filter(|id| !new_ids.contains(*id))
            .cloned()
            .collect();
        self.rules = winners.into_iter().map(|r| (r.id.clone(), r)).collect();
        removed
    }
}
