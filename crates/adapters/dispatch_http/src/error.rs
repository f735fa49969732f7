//! Transport adapter error types.

use signalhub_domain::error::SignalHubError;

/// Errors raised while commanding a device.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The device could not be reached or did not answer in time.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The device answered with a non-success status.
    #[error("device at {url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

impl From<DispatchError> for SignalHubError {
    fn from(err: DispatchError) -> Self {
        SignalHubError::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error_with_url() {
        let err = DispatchError::Status {
            url: "http://10.0.0.1:5000/immediate/red".to_string(),
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(
            err.to_string(),
            "device at http://10.0.0.1:5000/immediate/red answered 503 Service Unavailable"
        );
    }

    #[test]
    fn should_convert_into_transport_error() {
        let err: SignalHubError = DispatchError::Status {
            url: String::new(),
            status: reqwest::StatusCode::NOT_FOUND,
        }
        .into();
        assert!(matches!(err, SignalHubError::Transport(_)));
    }
}
