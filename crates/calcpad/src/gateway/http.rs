//! HTTP gateway for a remote arithmetic service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::wire::{ErrorBody, OperandsBody, ResultBody};
use super::{ArithmeticGateway, ComputeRequest, GatewayError, GatewayResult};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Gateway that POSTs operands to `{base_url}/api/v1/{operation}`
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Create a gateway pointing at the given base URL (e.g. `http://127.0.0.1:4100`)
    /// with [`DEFAULT_TIMEOUT`] applied to every request
    ///
    /// # Errors
    ///
    /// Returns the reqwest error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Create a gateway with a custom reqwest client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The URL a request is sent to
    pub fn endpoint(&self, request: &ComputeRequest) -> String {
        format!("{}/api/v1/{}", self.base_url, request.operation.name())
    }
}

#[async_trait]
impl ArithmeticGateway for HttpGateway {
    async fn compute(&self, request: ComputeRequest) -> GatewayResult<f64> {
        let url = self.endpoint(&request);
        tracing::debug!(%url, %request, "dispatching to arithmetic service");

        let body = OperandsBody {
            x: request.x,
            y: request.y,
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(%url, error = %err, "arithmetic service unreachable");
                GatewayError::Unreachable {
                    message: err.to_string(),
                }
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|err| GatewayError::Decode {
            message: err.to_string(),
        })?;

        let outcome = match status {
            StatusCode::OK => serde_json::from_str::<ResultBody>(&text)
                .map(|body| body.result)
                .map_err(|err| GatewayError::Decode {
                    message: err.to_string(),
                }),
            StatusCode::UNPROCESSABLE_ENTITY => match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => Err(GatewayError::Domain {
                    code: body.code,
                    message: body.message,
                }),
                Err(err) => Err(GatewayError::Decode {
                    message: err.to_string(),
                }),
            },
            StatusCode::SERVICE_UNAVAILABLE => Err(GatewayError::NotReady),
            other => Err(GatewayError::Api {
                status: other.as_u16(),
                body: text,
            }),
        };

        if let Err(err) = &outcome {
            tracing::warn!(%request, status = status.as_u16(), error = %err, "remote computation failed");
        }
        outcome
    }
}
