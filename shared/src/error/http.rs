//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::LocationNotFound
            | Self::AntennaNotFound
            | Self::RuleTemplateNotFound
            | Self::EffectiveRuleNotFound
            | Self::TaskNotFound
            | Self::ReceivingOrderNotFound
            | Self::SkuNotFound
            | Self::StaffNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists | Self::LocationAlreadyExists => StatusCode::CONFLICT,

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::InvalidMinMax
            | Self::ZoneNotOrderable
            | Self::EpcUnknown => StatusCode::UNPROCESSABLE_ENTITY,

            Self::TaskNotOpen | Self::ReceivingOrderNotOpen | Self::StaffNotEligible => {
                StatusCode::CONFLICT
            }

            Self::Unknown | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
