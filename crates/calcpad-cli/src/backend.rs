//! Gateway selection

use std::sync::Arc;

use calcpad::gateway::{ArithmeticGateway, HttpGateway, LocalGateway};

use crate::error::{CliError, CliResult};

/// Picks the gateway: in-process arithmetic, or the service at `remote`.
///
/// An empty `remote` counts as absent so `CALCPAD_REMOTE=` disables it.
pub fn select_gateway(remote: Option<&str>) -> CliResult<Arc<dyn ArithmeticGateway>> {
    match remote.map(str::trim).filter(|url| !url.is_empty()) {
        None => {
            tracing::debug!("using in-process arithmetic");
            Ok(Arc::new(LocalGateway::new()))
        }
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            tracing::info!(url, "using remote arithmetic service");
            let gateway = HttpGateway::new(url).map_err(|err| CliError::client(err.to_string()))?;
            Ok(Arc::new(gateway))
        }
        Some(url) => Err(CliError::invalid_argument(format!(
            "remote must be an http:// or https:// URL, got '{url}'"
        ))),
    }
}
