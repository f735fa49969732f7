//! # signalhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** under `/api` for adding, removing and inspecting
//!   traffic lights, forcing a color, starting a sequence and applying a
//!   global action
//! - Expose the registry snapshot with a per-light countdown so a front end
//!   can render color, mode and time left without its own clock logic
//! - Map HTTP requests into [`ControlService`](signalhub_app::services::control_service::ControlService)
//!   calls (driving adapter) and domain errors into status codes
//!
//! ## Dependency rule
//! Depends on `signalhub-app` (for port traits and services) and `signalhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
