//! Effective rule model

use super::sku::StockSource;
use serde::{Deserialize, Serialize};

/// The live min/max record the planner consults, derived from templates by
/// projection. Keyed by `(location_id, sku_id, source)`; `id` is the
/// canonical `rule-<locationId>-<skuId>-<source>` form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveRule {
    pub id: String,
    pub location_id: String,
    pub sku_id: String,
    pub source: StockSource,
    pub min: i64,
    pub max: i64,
    pub priority: i32,
    pub inbound_source_id: Option<String>,
    pub active: bool,
    pub updated_at: i64,
    /// Id of the winning template that produced this rule, for cascade tracking.
    pub owning_template_id: String,
}
