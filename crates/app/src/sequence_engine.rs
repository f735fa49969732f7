//! Sequence engine — drives every light in sequence mode around the cycle.
//!
//! The engine wakes on a fixed period, takes a registry snapshot and
//! advances each light whose deadline has passed. It never sleeps per light
//! and never waits on hardware: advancing a light only mutates the registry
//! and enqueues a command on the [`Dispatcher`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use signalhub_domain::address::Address;
use signalhub_domain::color::Color;
use signalhub_domain::light::TrafficLight;
use signalhub_domain::time::{self, Timestamp};

use crate::dispatcher::Dispatcher;
use crate::registry::Registry;

/// Default scan period.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// A color change performed by one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub address: Address,
    pub from: Color,
    pub to: Color,
}

/// Fixed-period scheduler for sequencing lights.
pub struct SequenceEngine {
    registry: Arc<Registry>,
    dispatcher: Dispatcher,
    tick: Duration,
}

impl SequenceEngine {
    /// Create an engine scanning every [`DEFAULT_TICK`].
    pub fn new(registry: Arc<Registry>, dispatcher: Dispatcher) -> Self {
        Self {
            registry,
            dispatcher,
            tick: DEFAULT_TICK,
        }
    }

    /// Override the scan period.
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Run one scan as if the current time were `now`.
    pub fn tick_at(&self, now: Timestamp) -> Vec<Transition> {
        let snapshot = self.registry.snapshot();
        self.advance_due(&snapshot, now)
    }

    /// Advance every light of `snapshot` that is due at `now`.
    ///
    /// The due check is repeated on the live entry under the registry lock,
    /// so a light overridden or removed after the snapshot was taken is left
    /// alone rather than clobbered or resurrected.
    pub fn advance_due(&self, snapshot: &[TrafficLight], now: Timestamp) -> Vec<Transition> {
        let mut transitions = Vec::new();

        for light in snapshot.iter().filter(|light| light.is_due(now)) {
            let advanced = self
                .registry
                .update(&light.address, |current| {
                    current.is_due(now).then(|| {
                        let from = current.active_color;
                        (from, current.advance(now))
                    })
                })
                .flatten();

            let Some((from, to)) = advanced else {
                tracing::trace!(address = %light.address, "light changed since snapshot, skipping");
                continue;
            };

            tracing::debug!(address = %light.address, %from, %to, "advancing light");
            self.dispatcher.dispatch(light.address.clone(), to);
            transitions.push(Transition {
                address: light.address.clone(),
                from,
                to,
            });
        }

        transitions
    }

    /// Run the tick loop on the current tokio runtime until aborted.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        tracing::info!(tick_ms = self.tick.as_millis(), "sequence engine started");

        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.tick_at(time::now());
        }
    }
}
