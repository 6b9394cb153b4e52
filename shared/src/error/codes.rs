//! Unified error codes for the inventory engine
//!
//! These codes classify gateway-level failures only (malformed input,
//! unknown resources at the HTTP boundary). Per-command business outcomes
//! (e.g. `duplicate_ignored`, `insufficient_inventory`) are modelled as
//! their own typed status enums in [`crate::inventory`] rather than as
//! error codes here — see DESIGN.md.
//!
//! Ranges:
//! - 0xxx: General
//! - 3xxx: Location / zone
//! - 4xxx: Rule / template
//! - 5xxx: Task / receiving order
//! - 6xxx: SKU / catalog
//! - 8xxx: Staff
//! - 9xxx: System

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidRequest = 5,
    InvalidFormat = 6,
    RequiredField = 7,
    ValueOutOfRange = 8,

    // ==================== 3xxx: Location / zone ====================
    LocationNotFound = 3001,
    LocationAlreadyExists = 3002,
    AntennaNotFound = 3003,
    ZoneNotOrderable = 3004,

    // ==================== 4xxx: Rule / template ====================
    RuleTemplateNotFound = 4001,
    EffectiveRuleNotFound = 4002,
    InvalidMinMax = 4003,

    // ==================== 5xxx: Task / receiving order ====================
    TaskNotFound = 5001,
    TaskNotOpen = 5002,
    ReceivingOrderNotFound = 5003,
    ReceivingOrderNotOpen = 5004,

    // ==================== 6xxx: SKU / catalog ====================
    SkuNotFound = 6001,
    EpcUnknown = 6002,

    // ==================== 8xxx: Staff ====================
    StaffNotFound = 8001,
    StaffNotEligible = 8002,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
}

#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl ErrorCode {
    pub fn code(&self) -> u16 {
        (*self).into()
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Unknown => "unknown error",
            Self::ValidationFailed => "validation failed",
            Self::NotFound => "resource not found",
            Self::AlreadyExists => "resource already exists",
            Self::InvalidRequest => "invalid request",
            Self::InvalidFormat => "invalid format",
            Self::RequiredField => "required field missing",
            Self::ValueOutOfRange => "value out of range",
            Self::LocationNotFound => "location not found",
            Self::LocationAlreadyExists => "location already exists",
            Self::AntennaNotFound => "antenna not found",
            Self::ZoneNotOrderable => "zone is not a sales location",
            Self::RuleTemplateNotFound => "rule template not found",
            Self::EffectiveRuleNotFound => "effective rule not found",
            Self::InvalidMinMax => "max must be greater than or equal to min",
            Self::TaskNotFound => "replenishment task not found",
            Self::TaskNotOpen => "task is not open",
            Self::ReceivingOrderNotFound => "receiving order not found",
            Self::ReceivingOrderNotOpen => "receiving order is not open",
            Self::SkuNotFound => "sku not found",
            Self::EpcUnknown => "epc has no active sku mapping",
            Self::StaffNotFound => "staff member not found",
            Self::StaffNotEligible => "staff member not eligible for zone",
            Self::InternalError => "internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,
            3001 => Self::LocationNotFound,
            3002 => Self::LocationAlreadyExists,
            3003 => Self::AntennaNotFound,
            3004 => Self::ZoneNotOrderable,
            4001 => Self::RuleTemplateNotFound,
            4002 => Self::EffectiveRuleNotFound,
            4003 => Self::InvalidMinMax,
            5001 => Self::TaskNotFound,
            5002 => Self::TaskNotOpen,
            5003 => Self::ReceivingOrderNotFound,
            5004 => Self::ReceivingOrderNotOpen,
            6001 => Self::SkuNotFound,
            6002 => Self::EpcUnknown,
            8001 => Self::StaffNotFound,
            8002 => Self::StaffNotEligible,
            9001 => Self::InternalError,
            other => return Err(InvalidErrorCode(other)),
        })
    }
}
