//! JSON bodies exchanged with the arithmetic service
//!
//! ```text
//! POST /api/v1/{operation}   { "x": 12, "y": 8 }
//!   200                      { "result": 20 }
//!   422                      { "code": "division_by_zero", "message": "Division by zero" }
//! GET  /health               { "status": "ok" }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{ArithmeticError, ErrorCode};

/// Request body: the two operands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperandsBody {
    /// Left-hand operand
    pub x: f64,
    /// Right-hand operand
    pub y: f64,
}

/// Success body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultBody {
    /// The computed value
    pub result: f64,
}

/// Domain failure body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Structured classification
    pub code: ErrorCode,
    /// Human-readable detail
    pub message: String,
}

impl From<&ArithmeticError> for ErrorBody {
    fn from(err: &ArithmeticError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Health check body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBody {
    /// Always `ok` while the service is up
    pub status: String,
}

impl HealthBody {
    /// The healthy response
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
