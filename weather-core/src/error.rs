use thiserror::Error;

use crate::provider::ProviderId;

/// Errors produced while configuring providers or fetching readings.
///
/// Upstream failures are surfaced to HTTP callers as-is, so the transport
/// and decode variants display exactly the underlying error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no temperature providers configured")]
    NoProviders,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error("{provider} request failed with status {status}: {body}")]
    UpstreamStatus {
        provider: ProviderId,
        status: reqwest::StatusCode,
        body: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors raised while building the service, before any request.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::MissingEnv { .. } | Error::InvalidConfig(_) | Error::NoProviders
        )
    }
}
