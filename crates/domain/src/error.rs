//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SignalHubError`] via `From`, so callers only ever match on one enum.

/// Top-level error returned by every fallible operation in signalhub.
#[derive(Debug, thiserror::Error)]
pub enum SignalHubError {
    /// Input rejected before any state was touched.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The referenced traffic light does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Persistence layer failure.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Hardware transport failure (unreachable device, timeout, bad status).
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("address must not be empty")]
    EmptyAddress,

    #[error("address {0:?} contains invalid characters")]
    InvalidAddress(String),

    #[error("{color} duration must be a positive number of seconds, got {value}")]
    InvalidDuration { color: &'static str, value: f64 },

    #[error("unknown color {0:?}")]
    UnknownColor(String),

    #[error("unknown mode {0:?}")]
    UnknownMode(String),

    #[error("unknown action {0:?}")]
    UnknownAction(String),
}

/// Lookup of a missing resource.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
