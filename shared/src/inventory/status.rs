//! Per-command typed status outcomes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestRfidReadStatus {
    Accepted,
    DuplicateIgnored,
    UnknownEpc,
    InvalidAntennaOrZone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForceZoneSweepStatus {
    Accepted,
    ZoneNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestSalesEventStatus {
    Accepted,
    AcceptedRfidImmediate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddCustomerItemStatus {
    Accepted { basket_item_id: String },
    ZoneNotFound,
    ZoneNotOrderable,
    InsufficientInventory { available_qty: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemoveCustomerItemStatus {
    Accepted,
    BasketItemNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutCustomerStatus {
    Accepted { items_sold: usize },
    NothingToCheckout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpsertRuleTemplateStatus {
    Accepted { template_id: String },
    InvalidMinMax,
    ZoneRequired,
    ZoneNotFound,
    SkuRequired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteRuleTemplateStatus {
    Accepted,
    AlreadyInactive,
    TemplateNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssignTaskStatus {
    Accepted,
    TaskNotOpen,
    StaffNotEligibleForZone,
    StaffNotFound,
    TaskNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartTaskStatus {
    Accepted,
    TaskNotOpen,
    StaffNotEligibleForZone,
    TaskNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfirmTaskStatus {
    Confirmed { moved_qty: i64 },
    ConfirmedPartial { moved_qty: i64 },
    NoInventoryMoved,
    TaskNotOpen,
    TaskNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CreateReceivingOrderStatus {
    Accepted { order_id: String },
    DestinationNotFound,
    SourceMismatch,
    SourceEqualsDestination,
    InvalidQuantity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfirmReceivingOrderStatus {
    Confirmed { moved_qty: i64 },
    NoInventoryMoved,
    OrderNotOpen,
    OrderNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ZoneCrudStatus {
    Accepted,
    ZoneNotFound,
    ZoneExists,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StaffCrudStatus {
    Accepted,
    StaffNotFound,
}

/// Trusted mirror of collaborator-owned master data (antennas, SKUs,
/// catalog variants, EPC mappings) the engine does not itself authorize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MasterDataStatus {
    Accepted,
}
