//! Storage port — durable copy of the registry.

use std::future::Future;

use signalhub_domain::error::SignalHubError;
use signalhub_domain::light::TrafficLight;

/// Loads and saves the full set of traffic lights so it survives restarts.
pub trait LightStore {
    /// Read every persisted light.
    fn load(&self) -> impl Future<Output = Result<Vec<TrafficLight>, SignalHubError>> + Send;

    /// Replace the persisted set with `lights`.
    fn save(
        &self,
        lights: Vec<TrafficLight>,
    ) -> impl Future<Output = Result<(), SignalHubError>> + Send;
}
