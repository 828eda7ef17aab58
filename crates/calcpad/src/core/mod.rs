//! Core arithmetic and number formatting
//!
//! The four arithmetic operations are pure functions over `f64`; failures are
//! reported through [`ArithmeticError`], which carries a stable [`ErrorCode`]
//! so callers never have to inspect message text.

pub mod format;
mod operations;

pub use operations::{Arithmetic, Operation, UnknownOperation};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for arithmetic operations
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Machine-readable classification of an arithmetic failure.
///
/// This is what travels over the wire from the arithmetic service, so the
/// calculator can tell a division by zero from any other failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The right operand of a division was zero
    DivisionByZero,
    /// The result was infinite
    Overflow,
    /// The result was not a number
    InvalidResult,
}

impl ErrorCode {
    /// Returns the wire form of the code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DivisionByZero => "division_by_zero",
            Self::Overflow => "overflow",
            Self::InvalidResult => "invalid_result",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic error types - exhaustive enum ensures all cases handled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Result is not a number
    #[error("Invalid result: {0}")]
    InvalidResult(String),
}

impl ArithmeticError {
    /// Returns the structured code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DivisionByZero => ErrorCode::DivisionByZero,
            Self::Overflow => ErrorCode::Overflow,
            Self::InvalidResult(_) => ErrorCode::InvalidResult,
        }
    }
}
