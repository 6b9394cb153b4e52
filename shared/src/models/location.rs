//! Location model

use serde::{Deserialize, Serialize};

/// A retail location (shelf, warehouse, cashier staging area, printing
/// wall...). Deleting a source from `sources` must cancel open tasks
/// pointing at it — enforced by the engine, not this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    /// Polygon on a 2-D plane; opaque to the engine, round-tripped for UI use.
    pub polygon: Vec<[f64; 2]>,
    pub color: String,
    pub is_sales_location: bool,
    /// Ordered list of replenishment source ids (other location ids or
    /// `external-*` ids). Order is significant: it is the candidate sort order.
    pub sources: Vec<String>,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_sales_location: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            polygon: Vec::new(),
            color: "#cccccc".to_string(),
            is_sales_location,
            sources: Vec::new(),
        }
    }
}

/// Create-location payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationCreate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub polygon: Vec<[f64; 2]>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub is_sales_location: bool,
    #[serde(default)]
    pub sources: Vec<String>,
}

fn default_color() -> String {
    "#cccccc".to_string()
}

/// Update-location payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub name: Option<String>,
    pub polygon: Option<Vec<[f64; 2]>>,
    pub color: Option<String>,
    pub is_sales_location: Option<bool>,
    pub sources: Option<Vec<String>>,
}
