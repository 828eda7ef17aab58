//! Gateway decorator that records every request

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{ArithmeticGateway, ComputeRequest, GatewayResult};

/// Wraps a gateway and keeps a history of the requests sent through it
#[derive(Debug, Default)]
pub struct RecordingGateway<G> {
    inner: G,
    calls: Mutex<Vec<ComputeRequest>>,
}

impl<G> RecordingGateway<G> {
    /// Wraps `inner`
    pub const fn new(inner: G) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, oldest first
    pub fn calls(&self) -> Vec<ComputeRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests seen so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Forgets recorded requests
    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// The wrapped gateway
    pub const fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: ArithmeticGateway> ArithmeticGateway for RecordingGateway<G> {
    async fn compute(&self, request: ComputeRequest) -> GatewayResult<f64> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        self.inner.compute(request).await
    }
}
