//! Shared application state for axum handlers.

use std::sync::Arc;

use signalhub_app::ports::LightStore;
use signalhub_app::services::control_service::ControlService;

/// Application state shared across all axum handlers.
///
/// Generic over the light store to avoid dynamic dispatch. `Clone` is
/// implemented manually so the store itself does not need to be `Clone`.
pub struct AppState<S> {
    /// Traffic-light control service.
    pub control: Arc<ControlService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            control: Arc::clone(&self.control),
        }
    }
}

impl<S> AppState<S>
where
    S: LightStore + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(control: ControlService<S>) -> Self {
        Self {
            control: Arc::new(control),
        }
    }

    /// Create a new application state from a pre-wrapped service.
    ///
    /// Use this when the service must also be reachable outside the router.
    pub fn from_arc(control: Arc<ControlService<S>>) -> Self {
        Self { control }
    }
}
