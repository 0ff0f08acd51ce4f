//! Error types for the kdecole client.
//!
//! This module defines `KdecoleError`, the unified error type used for
//! every operation of the client.
//!
//! # Security
//!
//! The session token grants full access to the account. It is never logged
//! by the crate; use `sanitize_message()` when forwarding error text from
//! external sources to logs or user-facing output.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all client operations.
///
/// The variants map onto the three failure kinds of the remote contract:
/// rejected authentication, a rejected or malformed API call, and transport
/// failures surfaced unmodified from the HTTP layer.
#[derive(Error, Debug)]
pub enum KdecoleError {
    /// Configuration error - invalid endpoint or institution data.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Authentication was rejected: bad credentials on login, a revoked or
    /// expired token on a session check, or a refused logout.
    #[error("authentication failed - the credentials or session token were rejected")]
    Authentication,

    /// The remote service refused the call or acknowledged it negatively.
    #[error("the {service} service rejected the request{}", status_suffix(.status))]
    Request {
        /// Service name segment of the failed call.
        service: &'static str,
        /// HTTP status, when the failure was signalled at the HTTP level.
        status: Option<StatusCode>,
    },

    /// Network-level failure (connection error, timeout), surfaced
    /// unmodified from the transport. Never retried.
    #[error("HTTP transport failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the JSON the service contract promises.
    #[error("could not decode the {service} response: {source}")]
    Decode {
        /// Service name segment of the failed call.
        service: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

fn status_suffix(status: &Option<StatusCode>) -> String {
    match status {
        Some(status) => format!(" (HTTP {status})"),
        None => String::new(),
    }
}

impl KdecoleError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        KdecoleError::Config(message.into())
    }

    /// Creates a request error carrying the HTTP status of the failure.
    pub(crate) fn request(service: &'static str, status: StatusCode) -> Self {
        KdecoleError::Request {
            service,
            status: Some(status),
        }
    }

    /// Creates a request error for a call the server acknowledged
    /// negatively (or not at all) in the response body.
    pub(crate) fn rejected(service: &'static str) -> Self {
        KdecoleError::Request {
            service,
            status: None,
        }
    }

    /// Creates a decode error for a non-JSON body where JSON was expected.
    pub(crate) fn decode(service: &'static str, source: serde_json::Error) -> Self {
        KdecoleError::Decode { service, source }
    }

    /// Sanitizes a message by removing any occurrence of the session token.
    ///
    /// The token must never appear in logs, error output, or bug reports.
    ///
    /// # Returns
    ///
    /// The message with every occurrence of the token replaced with
    /// `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, token: &str) -> String {
        if token.is_empty() {
            return message.to_string();
        }
        message.replace(token, "[REDACTED]")
    }
}
