//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Location,
    Rule,
    Task,
    Catalog,
    Staff,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            3000..4000 => Self::Location,
            4000..5000 => Self::Rule,
            5000..6000 => Self::Task,
            6000..7000 => Self::Catalog,
            8000..9000 => Self::Staff,
            _ => Self::System,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Location => "location",
            Self::Rule => "rule",
            Self::Task => "task",
            Self::Catalog => "catalog",
            Self::Staff => "staff",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_code_ranges() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Location);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Rule);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Task);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Staff);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn error_code_category() {
        assert_eq!(ErrorCode::LocationNotFound.category(), ErrorCategory::Location);
        assert_eq!(ErrorCode::TaskNotOpen.category(), ErrorCategory::Task);
    }
}
