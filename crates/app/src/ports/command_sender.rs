//! Command sender port — delivers one color command to one device.

use std::future::Future;

use signalhub_domain::address::Address;
use signalhub_domain::color::Color;
use signalhub_domain::error::SignalHubError;

/// Transport that sets a device's lamp to a color right away.
///
/// Implementations report failures as [`SignalHubError::Transport`]; the
/// [`Dispatcher`](crate::dispatcher::Dispatcher) applies the timeout and
/// discards the error, so nothing here ever reaches a control caller.
pub trait CommandSender {
    /// Send `color` to the device at `address`.
    fn send(
        &self,
        address: &Address,
        color: Color,
    ) -> impl Future<Output = Result<(), SignalHubError>> + Send;
}

impl<T: CommandSender + Send + Sync> CommandSender for std::sync::Arc<T> {
    fn send(
        &self,
        address: &Address,
        color: Color,
    ) -> impl Future<Output = Result<(), SignalHubError>> + Send {
        (**self).send(address, color)
    }
}
