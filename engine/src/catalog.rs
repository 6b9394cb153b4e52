//! Catalog lookup.
//!
//! The engine does not own master data. Collaborators register each SKU's
//! catalog variant so the rule-template projection can evaluate ATTRIBUTES
//! selectors and the checkout flow can decide personalisability.

use shared::models::CatalogVariant;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CatalogStore {
    variants: HashMap<String, CatalogVariant>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, variant: CatalogVariant) {
        self.variants.insert(variant.sku_id.clone(), variant);
    }

    pub fn get(&self, sku_id: &str) -> Option<&CatalogVariant> {
        self.variants.get(sku_id)
    }

    pub fn is_personalisable(&self, sku_id: &str) -> bool {
        self.variants
            .get(sku_id)
            .is_some_and(|v| v.is_personalisable())
    }

    pub fn all(&self) -> impl Iterator<Item = &CatalogVariant> {
        self.variants.values()
    }
}
