//! Arithmetic gateway: the call boundary between the calculator and its backend
//!
//! The state machine emits a [`ComputeRequest`]; whoever drives it awaits an
//! [`ArithmeticGateway`] and feeds the outcome back. One call per request, no
//! retries, no caching.

mod local;
mod recording;
pub mod wire;

#[cfg(feature = "http")]
mod http;

pub use local::LocalGateway;
pub use recording::RecordingGateway;

#[cfg(feature = "http")]
pub use http::HttpGateway;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::format::number_to_string;
use crate::core::{ArithmeticError, ErrorCode, Operation};

/// Result type for gateway calls
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A resolved `(operation, x, y)` triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// The operation to apply
    pub operation: Operation,
    /// Left-hand operand
    pub x: f64,
    /// Right-hand operand
    pub y: f64,
}

impl ComputeRequest {
    /// Creates a request
    #[must_use]
    pub const fn new(operation: Operation, x: f64, y: f64) -> Self {
        Self { operation, x, y }
    }
}

impl std::fmt::Display for ComputeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            number_to_string(self.x),
            self.operation.symbol(),
            number_to_string(self.y)
        )
    }
}

/// Gateway failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend rejected the operands
    #[error("{message}")]
    Domain {
        /// Structured classification
        code: ErrorCode,
        /// Human-readable detail
        message: String,
    },

    /// The backend has not finished starting up
    #[error("Calculator not ready")]
    NotReady,

    /// The backend could not be reached
    #[error("Arithmetic service unreachable: {message}")]
    Unreachable {
        /// Transport error detail
        message: String,
    },

    /// The backend answered with an unexpected status
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The backend answered with something that is not a result
    #[error("Malformed response: {message}")]
    Decode {
        /// Decoder error detail
        message: String,
    },
}

impl GatewayError {
    /// Structured code, for domain failures
    #[must_use]
    pub const fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Domain { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this failure is a division by zero
    #[must_use]
    pub const fn is_division_by_zero(&self) -> bool {
        matches!(self.code(), Some(ErrorCode::DivisionByZero))
    }
}

impl From<ArithmeticError> for GatewayError {
    fn from(err: ArithmeticError) -> Self {
        Self::Domain {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// The arithmetic backend as seen by the calculator
#[async_trait]
pub trait ArithmeticGateway: Send + Sync {
    /// Computes `x op y`
    async fn compute(&self, request: ComputeRequest) -> GatewayResult<f64>;
}

#[async_trait]
impl<G: ArithmeticGateway + ?Sized> ArithmeticGateway for Arc<G> {
    async fn compute(&self, request: ComputeRequest) -> GatewayResult<f64> {
        (**self).compute(request).await
    }
}

#[async_trait]
impl<G: ArithmeticGateway + ?Sized> ArithmeticGateway for Box<G> {
    async fn compute(&self, request: ComputeRequest) -> GatewayResult<f64> {
        (**self).compute(request).await
    }
}
