//! # signalhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CommandSender` — deliver one color command to one device
//!   - `LightStore` — load/save the registry contents
//! - Provide the **in-process core** that needs no IO of its own:
//!   - `Registry` — the authoritative, lock-guarded set of traffic lights
//!   - `Dispatcher` — bounded queue + worker pool in front of `CommandSender`
//!   - `SequenceEngine` — the fixed-period tick loop advancing sequencing lights
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ControlService` — add/remove, manual override, start sequence,
//!     global actions, snapshot
//!
//! ## Dependency rule
//! Depends on `signalhub-domain` only (plus `tokio` for tasks, channels and
//! timers). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod dispatcher;
pub mod ports;
pub mod registry;
pub mod sequence_engine;
pub mod services;
