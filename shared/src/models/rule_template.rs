//! Rule template model

use super::catalog::AttributeFilter;
use super::sku::StockSource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateScope {
    Generic,
    Location,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Selector {
    Sku { sku_id: String },
    Attributes { filter: AttributeFilter },
}

/// A generic/location-scoped min/max template with a SKU or attribute
/// selector. Soft-deleted (`active = false`) rather than removed outright so
/// that re-projection can still observe its prior winner set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTemplate {
    pub id: String,
    pub scope: TemplateScope,
    /// Required when `scope == Location`; ignored (matches every location) when `Generic`.
    pub location_id: Option<String>,
    pub source: StockSource,
    pub selector: Selector,
    pub min: i64,
    pub max: i64,
    pub priority: i32,
    pub inbound_source_id: Option<String>,
    pub active: bool,
    pub updated_at: i64,
}

/// Upsert payload for a rule template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTemplateUpsert {
    pub id: Option<String>,
    pub scope: TemplateScope,
    pub location_id: Option<String>,
    pub source: StockSource,
    pub selector: Selector,
    pub min: i64,
    pub max: i64,
    #[serde(default)]
    pub priority: i32,
    pub inbound_source_id: Option<String>,
}
