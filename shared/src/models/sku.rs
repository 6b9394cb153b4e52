//! SKU model

use serde::{Deserialize, Serialize};

/// The two merchandise classes the engine tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockSource {
    Rfid,
    NonRfid,
}

impl StockSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rfid => "RFID",
            Self::NonRfid => "NON_RFID",
        }
    }
}

impl std::fmt::Display for StockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A SKU. `source` is immutable once created; RFID SKUs are realised as a
/// set of EPCs, NON_RFID SKUs as a ledger quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sku {
    pub id: String,
    pub source: StockSource,
}
