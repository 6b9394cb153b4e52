//! Unified error system for the inventory engine
//!
//! - [`ErrorCode`]: standardized gateway-level error codes
//! - [`ErrorCategory`]: classification of codes by range
//! - [`AppError`]: rich error type with code, message, details
//! - [`ApiResponse`]: unified HTTP response envelope

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiError, ApiResponse, AppError, AppResult};
