//! # signalhub-domain
//!
//! Pure domain model for the signalhub traffic-light coordinator.
//!
//! ## Responsibilities
//! - Foundational types: device addresses, error conventions, timestamps
//! - Define **Colors** and the fixed green → yellow → red cycle
//! - Define **Durations** (per-color phase lengths with fallbacks)
//! - Define **Traffic lights** (one physical unit, its mode and schedule)
//! - Define **Global actions** applied to every light at once
//! - Contain all invariant enforcement and state-transition logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod address;
pub mod error;
pub mod time;

pub mod action;
pub mod color;
pub mod durations;
pub mod light;
