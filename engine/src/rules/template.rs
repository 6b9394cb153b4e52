//! Rule template storage and the projection algorithm that turns active
//! templates into the effective rule set consumed by the replenishment
//! planner.

use crate::catalog::CatalogStore;
use shared::models::{EffectiveRule, Location, RuleTemplate, Selector, Sku, TemplateScope};
use shared::util;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: HashMap<String, RuleTemplate>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&RuleTemplate> {
        self.templates.get(id)
    }

    pub fn upsert(&mut self, template: RuleTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Soft-delete: projection treats an inactive template as producing no
    /// candidates, but its row survives so a later reactivation is possible.
    pub fn deactivate(&mut self, id: &str, now: i64) -> bool {
        if let Some(t) = self.templates.get_mut(id) {
            t.active = false;
            t.updated_at = now;
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &RuleTemplate> {
        self.templates.values().filter(|t| t.active)
    }

    pub fn all(&self) -> impl Iterator<Item = &RuleTemplate> {
        self.templates.values()
    }
}

fn scope_priority(scope: TemplateScope) -> u8 {
    match scope {
        TemplateScope::Generic => 0,
        TemplateScope::Location => 1,
    }
}

/// A template matches `sku` iff its selector is satisfied.
fn selector_matches(selector: &Selector, sku: &Sku, catalog: &CatalogStore) -> bool {
    match selector {
        Selector::Sku { sku_id } => sku_id == &sku.id,
        Selector::Attributes { filter } => catalog
            .get(&sku.id)
            .is_some_and(|variant| filter.matches(variant)),
    }
}

/// A template matches `location` iff GENERIC (matches every location) or
/// LOCATION scoped to exactly this id.
fn location_matches(template: &RuleTemplate, location: &Location) -> bool {
    match template.scope {
        TemplateScope::Generic => true,
        TemplateScope::Location => template.location_id.as_deref() == Some(location.id.as_str()),
    }
}

/// Project the active template set into the full effective rule set.
///
/// For every `(location, sku)` pair whose source matches, every active
/// template that matches both is a candidate producing that rule's source.
/// Ties are broken lexicographically on `(scope priority, template.priority,
/// updated_at)`, highest first: LOCATION beats GENERIC, then higher template
/// priority, then the most recently updated template.
pub fn project(
    templates: &TemplateStore,
    locations: &[&Location],
    skus: &[&Sku],
    catalog: &CatalogStore,
) -> Vec<EffectiveRule> {
    let actives: Vec<&RuleTemplate> = templates.active().collect();
    let mut winners: HashMap<(String, String), (&RuleTemplate, (u8, i32, i64))> = HashMap::new();

    for location in locations {
        for sku in skus {
            for template in &actives {
                if template.source != sku.source {
                    continue;
                }
                if !location_matches(template, location) {
                    continue;
                }
                if !selector_matches(&template.selector, sku, catalog) {
                    continue;
                }
                let key = (location.id.clone(), sku.id.clone());
                let rank = (
                    scope_priority(template.scope),
                    template.priority,
                    template.updated_at,
                );
                match winners.get(&key) {
                    Some((_, existing_rank)) if *existing_rank >= rank => {}
                    _ => {
                        winners.insert(key, (template, rank));
                    }
                }
            }
        }
    }

    winners
        .into_iter()
        .map(|((location_id, sku_id), (template, _))| {
            let source = template.source;
            EffectiveRule {
                id: util::rule_id(&location_id, &sku_id, source.as_str()),
                location_id,
                sku_id,
                source,
                min: template.min,
                max: template.max,
                priority: template.priority,
                inbound_source_id: template.inbound_source_id.clone(),
                active: true,
                updated_at: template.updated_at,
                owning_template_id: template.id.clone(),
            }
        })
        .collect()
}
