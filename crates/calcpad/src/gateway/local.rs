//! In-process gateway

use async_trait::async_trait;

use super::{ArithmeticGateway, ComputeRequest, GatewayError, GatewayResult};
use crate::core::Arithmetic;

/// Gateway that runs [`Arithmetic`] in-process
#[derive(Debug, Clone, Copy)]
pub struct LocalGateway {
    ready: bool,
}

impl Default for LocalGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalGateway {
    /// Creates a ready gateway
    #[must_use]
    pub const fn new() -> Self {
        Self { ready: true }
    }

    /// Creates a gateway whose backend never finished starting; every call
    /// fails with [`GatewayError::NotReady`]
    #[must_use]
    pub const fn not_ready() -> Self {
        Self { ready: false }
    }

    /// Whether calls will be served
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }
}

#[async_trait]
impl ArithmeticGateway for LocalGateway {
    async fn compute(&self, request: ComputeRequest) -> GatewayResult<f64> {
        if !self.ready {
            tracing::warn!(%request, "local arithmetic not ready");
            return Err(GatewayError::NotReady);
        }

        tracing::debug!(%request, "computing locally");
        Arithmetic::calculate(request.operation, request.x, request.y).map_err(|err| {
            tracing::warn!(%request, error = %err, "local arithmetic failed");
            GatewayError::from(err)
        })
    }
}
