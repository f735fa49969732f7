//! Device registry — the single source of truth for traffic-light state.
//!
//! One mutex guards the whole map. Every read hands out clones and every
//! write runs inside one critical section, so a light's color and deadline
//! always change together and iterators never see concurrent mutation.
//! The lock is never held across an `.await`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use signalhub_domain::address::Address;
use signalhub_domain::light::TrafficLight;

/// Result of [`Registry::add`].
#[derive(Debug, Clone, PartialEq)]
pub enum Added {
    /// A fresh light was inserted.
    Created(TrafficLight),
    /// The address was already registered; nothing changed.
    Existing(TrafficLight),
}

impl Added {
    /// The light now stored under the address.
    #[must_use]
    pub fn light(&self) -> &TrafficLight {
        match self {
            Self::Created(light) | Self::Existing(light) => light,
        }
    }

    #[must_use]
    pub fn into_light(self) -> TrafficLight {
        match self {
            Self::Created(light) | Self::Existing(light) => light,
        }
    }
}

/// In-memory set of traffic lights keyed (and ordered) by address.
#[derive(Debug, Default)]
pub struct Registry {
    lights: Mutex<BTreeMap<Address, TrafficLight>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a light with default state, unless the address is taken.
    pub fn add(&self, address: Address) -> Added {
        let mut lights = self.lock();
        if let Some(existing) = lights.get(&address) {
            return Added::Existing(existing.clone());
        }
        let light = TrafficLight::new(address.clone());
        lights.insert(address, light.clone());
        Added::Created(light)
    }

    /// Forget a light. Returns the removed state, or `None` if absent.
    pub fn remove(&self, address: &Address) -> Option<TrafficLight> {
        self.lock().remove(address)
    }

    /// Copy of one light's current state.
    #[must_use]
    pub fn get(&self, address: &Address) -> Option<TrafficLight> {
        self.lock().get(address).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Point-in-time copy of every light, in ascending address order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TrafficLight> {
        self.lock().values().cloned().collect()
    }

    /// Mutate one light atomically.
    ///
    /// Returns `None` without calling `f` when the address is unknown.
    pub fn update<R>(&self, address: &Address, f: impl FnOnce(&mut TrafficLight) -> R) -> Option<R> {
        self.lock().get_mut(address).map(f)
    }

    /// Mutate every light inside a single critical section, in address order.
    pub fn update_all<R>(&self, f: impl FnMut(&mut TrafficLight) -> R) -> Vec<R> {
        self.lock().values_mut().map(f).collect()
    }

    /// Replace the whole content, e.g. with lights loaded from storage.
    ///
    /// When the same address appears twice the last one wins.
    pub fn restore(&self, lights: impl IntoIterator<Item = TrafficLight>) {
        let restored: BTreeMap<_, _> = lights
            .into_iter()
            .map(|light| (light.address.clone(), light))
            .collect();
        *self.lock() = restored;
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<Address, TrafficLight>> {
        self.lights.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
