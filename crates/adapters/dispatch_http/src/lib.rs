//! # signalhub-adapter-dispatch-http
//!
//! Transport adapter — implements the `CommandSender` port over HTTP.
//!
//! ## Responsibilities
//! - Issue `GET http://{address}:{device_port}/immediate/{color}` for every
//!   command the dispatcher hands over
//! - Report unreachable devices, timeouts and non-2xx answers as
//!   [`SignalHubError::Transport`]
//!
//! ## Dependency rule
//! Depends on `signalhub-app` (for the port trait) and `signalhub-domain`.

mod config;
mod error;

pub use config::DispatchConfig;
pub use error::DispatchError;

use std::future::Future;

use signalhub_app::ports::CommandSender;
use signalhub_domain::address::Address;
use signalhub_domain::color::Color;
use signalhub_domain::error::SignalHubError;

/// [`CommandSender`] talking to the devices' `/immediate/{color}` endpoint.
#[derive(Debug, Clone)]
pub struct HttpCommandSender {
    client: reqwest::Client,
    device_port: u16,
}

impl HttpCommandSender {
    /// Build a sender with a client-level timeout taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Client`] if the HTTP client cannot be built.
    pub fn new(config: &DispatchConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(DispatchError::Client)?;
        Ok(Self {
            client,
            device_port: config.device_port,
        })
    }

    /// Endpoint that switches the device at `address` to `color`.
    #[must_use]
    pub fn url(&self, address: &Address, color: Color) -> String {
        format!(
            "http://{address}:{port}/immediate/{color}",
            port = self.device_port
        )
    }

    async fn send_inner(&self, url: String) -> Result<(), DispatchError> {
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(DispatchError::Request { url, source }),
        };
        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status { url, status });
        }
        tracing::trace!(%url, %status, "device acknowledged command");
        Ok(())
    }
}

impl CommandSender for HttpCommandSender {
    fn send(
        &self,
        address: &Address,
        color: Color,
    ) -> impl Future<Output = Result<(), SignalHubError>> + Send {
        let url = self.url(address, color);
        async move { self.send_inner(url).await.map_err(SignalHubError::from) }
    }
}
