// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for accessmonitor.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using [`EngineError`]
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures while fetching a page
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("redirect limit exceeded after {0} redirects")]
    TooManyRedirects(usize),

    #[error("redirect target could not be resolved")]
    InvalidRedirect,

    #[error("server responded with HTTP {0}")]
    HttpStatus(u16),

    #[error("response body exceeded the {0} byte limit")]
    PayloadTooLarge(usize),

    #[error("host could not be resolved")]
    HostNotFound,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("TLS failure: {0}")]
    Tls(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Classify a reqwest error into the fetch taxonomy. Timeout is
    /// reported directly by reqwest; DNS, refused-connection, and TLS
    /// failures are recognized from the error source chain.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        use std::error::Error as _;

        if err.is_timeout() {
            return FetchError::Timeout;
        }

        let mut chain_text = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            if let Some(io) = cause.downcast_ref::<std::io::Error>() {
                if io.kind() == std::io::ErrorKind::ConnectionRefused {
                    return FetchError::ConnectionRefused;
                }
            }
            chain_text.push_str(": ");
            chain_text.push_str(&cause.to_string());
            source = cause.source();
        }

        let lowered = chain_text.to_lowercase();
        if lowered.contains("dns") || lowered.contains("failed to lookup") {
            FetchError::HostNotFound
        } else if lowered.contains("certificate")
            || lowered.contains("tls")
            || lowered.contains("handshake")
        {
            FetchError::Tls(chain_text)
        } else {
            FetchError::Request(chain_text)
        }
    }
}

/// Failures surfaced by the engine's public operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid contact address: {0}")]
    InvalidContact(String),

    #[error("monitor not found: {0}")]
    MonitorNotFound(Uuid),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}
