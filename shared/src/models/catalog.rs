//! Catalog attribute bag
//!
//! The engine does not own master data (Non-goal: authoritative master-data
//! management) but it does need a small, queryable view of each SKU's
//! catalog variant to evaluate ATTRIBUTES rule-template selectors and to
//! decide whether a sold SKU is "personalisable". Collaborators register
//! this view; the engine treats it as an opaque lookup table.

use serde::{Deserialize, Serialize};

/// A subset-matchable attribute bag for one SKU's catalog variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogVariant {
    pub sku_id: String,
    pub title: String,
    pub kit: Option<String>,
    pub age_group: Option<String>,
    pub gender: Option<String>,
    /// Catalog role, e.g. "player" / "goalkeeper" — distinct from [`crate::models::StaffRole`].
    pub role: Option<String>,
    pub quality: Option<String>,
}

/// One attribute-equality clause of an ATTRIBUTES rule-template selector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub kit: Option<String>,
    pub age_group: Option<String>,
    pub gender: Option<String>,
    pub role: Option<String>,
    pub quality: Option<String>,
}

impl AttributeFilter {
    /// True if every specified clause equals the variant's corresponding field.
    /// Clauses left `None` impose no constraint.
    pub fn matches(&self, variant: &CatalogVariant) -> bool {
        matches_field(&self.kit, &variant.kit)
            && matches_field(&self.age_group, &variant.age_group)
            && matches_field(&self.gender, &variant.gender)
            && matches_field(&self.role, &variant.role)
            && matches_field(&self.quality, &variant.quality)
    }
}

fn matches_field(filter: &Option<String>, value: &Option<String>) -> bool {
    match filter {
        None => true,
        Some(f) => value.as_deref() == Some(f.as_str()),
    }
}

impl CatalogVariant {
    /// A SKU is personalisable if its catalog role is player/goalkeeper or
    /// its title contains "JSY" (jersey), per the checkout routing rule.
    pub fn is_personalisable(&self) -> bool {
        matches!(self.role.as_deref(), Some("player") | Some("goalkeeper"))
            || self.title.contains("JSY")
    }
}
