//! Control service — use-cases for operators and the HTTP surface.
//!
//! Every mutation goes through the shared [`Registry`] first, then the
//! resulting color is handed to the [`Dispatcher`] and the registry is
//! written back to the [`LightStore`]. Neither of the last two steps can
//! fail the call: the registry stays authoritative.
//!
//! Writes to the store are serialized, and each one snapshots the registry
//! only once it holds the write lock, so the last write always carries the
//! newest state.

use std::sync::Arc;

use tokio::sync::Mutex;

use signalhub_domain::action::GlobalAction;
use signalhub_domain::address::Address;
use signalhub_domain::color::Color;
use signalhub_domain::durations::Durations;
use signalhub_domain::error::{NotFoundError, SignalHubError};
use signalhub_domain::light::TrafficLight;
use signalhub_domain::time;

use crate::dispatcher::Dispatcher;
use crate::ports::LightStore;
use crate::registry::{Added, Registry};

/// Application service behind every control operation.
pub struct ControlService<S> {
    registry: Arc<Registry>,
    dispatcher: Dispatcher,
    store: S,
    persist_lock: Mutex<()>,
}

impl<S: LightStore> ControlService<S> {
    /// Create a new service sharing `registry` with the sequence engine.
    pub fn new(registry: Arc<Registry>, dispatcher: Dispatcher, store: S) -> Self {
        Self {
            registry,
            dispatcher,
            store,
            persist_lock: Mutex::new(()),
        }
    }

    /// Seed the registry from storage.
    ///
    /// Returns the number of lights restored.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the persisted set cannot be read; the
    /// registry is left untouched in that case.
    #[tracing::instrument(skip(self))]
    pub async fn restore(&self) -> Result<usize, SignalHubError> {
        let lights = self.store.load().await?;
        let count = lights.len();
        self.registry.restore(lights);
        tracing::info!(count, "restored traffic lights");
        Ok(count)
    }

    /// Register a light at `address`.
    ///
    /// Adding an address that is already registered leaves it untouched
    /// and returns [`Added::Existing`].
    ///
    /// # Errors
    ///
    /// Never fails today; the `Result` keeps the signature in line with the
    /// other use-cases.
    #[tracing::instrument(skip(self))]
    pub async fn add_light(&self, address: Address) -> Result<Added, SignalHubError> {
        let added = self.registry.add(address);
        if matches!(added, Added::Created(_)) {
            tracing::info!("traffic light added");
            self.persist().await;
        }
        Ok(added)
    }

    /// Forget the light at `address`. Unknown addresses are ignored.
    ///
    /// # Errors
    ///
    /// Never fails today.
    #[tracing::instrument(skip(self))]
    pub async fn remove_light(&self, address: &Address) -> Result<(), SignalHubError> {
        if self.registry.remove(address).is_some() {
            tracing::info!("traffic light removed");
            self.persist().await;
        }
        Ok(())
    }

    /// Current state of one light.
    ///
    /// # Errors
    ///
    /// Returns [`SignalHubError::NotFound`] when no light has `address`.
    pub fn get_light(&self, address: &Address) -> Result<TrafficLight, SignalHubError> {
        self.registry
            .get(address)
            .ok_or_else(|| not_found(address).into())
    }

    /// Every light, ordered by address.
    pub fn list_lights(&self) -> Vec<TrafficLight> {
        self.registry.snapshot()
    }

    /// Fix a light on `color`, taking it out of sequence mode.
    ///
    /// # Errors
    ///
    /// Returns [`SignalHubError::NotFound`] when no light has `address`.
    #[tracing::instrument(skip(self))]
    pub async fn manual_override(
        &self,
        address: &Address,
        color: Color,
    ) -> Result<TrafficLight, SignalHubError> {
        let light = self
            .registry
            .update(address, |light| {
                light.set_manual(color);
                light.clone()
            })
            .ok_or_else(|| not_found(address))?;

        self.dispatcher.dispatch(address.clone(), color);
        self.persist().await;
        Ok(light)
    }

    /// Store `durations` on a light and (re)start its cycle at green.
    ///
    /// # Errors
    ///
    /// Returns [`SignalHubError::Validation`] when a duration is not a
    /// positive number of seconds, checked before the lookup, and
    /// [`SignalHubError::NotFound`] when no light has `address`.
    #[tracing::instrument(skip(self))]
    pub async fn start_sequence(
        &self,
        address: &Address,
        durations: Durations,
    ) -> Result<TrafficLight, SignalHubError> {
        durations.validate()?;

        let now = time::now();
        let light = self
            .registry
            .update(address, |light| {
                light.start_sequence_with(durations, now);
                light.clone()
            })
            .ok_or_else(|| not_found(address))?;

        self.dispatcher.dispatch(address.clone(), light.active_color);
        self.persist().await;
        Ok(light)
    }

    /// Apply `action` to every registered light at the same instant.
    ///
    /// Returns the updated lights, ordered by address.
    ///
    /// # Errors
    ///
    /// Never fails today.
    #[tracing::instrument(skip(self))]
    pub async fn global_action(
        &self,
        action: GlobalAction,
    ) -> Result<Vec<TrafficLight>, SignalHubError> {
        let now = time::now();
        let lights = self.registry.update_all(|light| {
            match action {
                GlobalAction::Off => light.switch_off(),
                GlobalAction::SyncSequence => light.start_sequence(now),
            }
            light.clone()
        });

        for light in &lights {
            self.dispatcher
                .dispatch(light.address.clone(), light.active_color);
        }
        tracing::info!(count = lights.len(), "global action applied");

        self.persist().await;
        Ok(lights)
    }

    async fn persist(&self) {
        let _guard = self.persist_lock.lock().await;
        if let Err(err) = self.store.save(self.registry.snapshot()).await {
            tracing::error!(%err, "failed to persist traffic lights");
        }
    }
}

fn not_found(address: &Address) -> NotFoundError {
    NotFoundError {
        entity: "TrafficLight",
        id: address.to_string(),
    }
}
