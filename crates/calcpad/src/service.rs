//! Arithmetic service
//!
//! HTTP surface for the four arithmetic operations:
//!
//! - `POST /api/v1/{operation}` with `{ "x", "y" }`: `200 { "result" }`, or
//!   `422 { "code", "message" }` for a domain error
//! - `GET /health`: `200 { "status": "ok" }`
//!
//! An unknown operation is a `404`.

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::core::{Arithmetic, Operation};
use crate::gateway::wire::{ErrorBody, HealthBody, OperandsBody, ResultBody};

/// Default port for the arithmetic service
pub const DEFAULT_PORT: u16 = 4100;

/// Arithmetic service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to bind
    pub port: u16,
    /// Enable permissive CORS
    pub cors: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            cors: false,
        }
    }
}

impl ServiceConfig {
    /// Create a builder
    #[must_use]
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// The socket address to bind
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Base URL clients should use
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.socket_addr())
    }
}

/// Builder for `ServiceConfig`
#[derive(Debug, Clone, Default)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Set the bind address
    #[must_use]
    pub const fn host(mut self, host: IpAddr) -> Self {
        self.config.host = host;
        self
    }

    /// Set the port
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable CORS
    #[must_use]
    pub const fn cors(mut self, enabled: bool) -> Self {
        self.config.cors = enabled;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> ServiceConfig {
        self.config
    }
}

/// HTTP server wrapping [`Arithmetic`]
#[derive(Debug, Clone)]
pub struct ArithmeticService {
    config: ServiceConfig,
}

impl ArithmeticService {
    /// Create a service
    #[must_use]
    pub const fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// The service configuration
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Build the router
    pub fn router(&self) -> Router {
        let app = Router::new()
            .route("/health", get(health))
            .route("/api/v1/{operation}", post(compute));

        if self.config.cors {
            app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            app
        }
    }

    /// Bind the configured address and serve until the process stops
    pub async fn run(&self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener).await
    }

    /// Bind the configured address and serve until `shutdown` resolves
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, cors = self.config.cors, "arithmetic service listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("arithmetic service stopped");
        Ok(())
    }

    /// Serve on an already-bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(%addr, cors = self.config.cors, "arithmetic service listening");
        axum::serve(listener, self.router()).await
    }
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody::ok())
}

async fn compute(Path(operation): Path<String>, Json(body): Json<OperandsBody>) -> Response {
    let op = match operation.parse::<Operation>() {
        Ok(op) => op,
        Err(err) => {
            tracing::debug!(%operation, "unknown operation");
            return (StatusCode::NOT_FOUND, err.to_string()).into_response();
        }
    };

    match Arithmetic::calculate(op, body.x, body.y) {
        Ok(result) => {
            tracing::debug!(%op, x = body.x, y = body.y, result, "computed");
            Json(ResultBody { result }).into_response()
        }
        Err(err) => {
            tracing::info!(%op, x = body.x, y = body.y, code = %err.code(), "rejected");
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody::from(&err))).into_response()
        }
    }
}
