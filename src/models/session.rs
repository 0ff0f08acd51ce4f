//! Session envelopes: activation and acknowledgment responses.

use serde::Deserialize;

/// Response envelope of the `activation` service.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivationResponse {
    /// Whether the credentials were accepted.
    #[serde(default)]
    pub success: bool,

    /// The issued session token, present on success.
    #[serde(default)]
    pub authtoken: Option<String>,
}

/// Minimal acknowledgment envelope returned by logout and by mutating
/// services.
///
/// The `success` flag is optional on the wire; an absent flag counts as a
/// missing acknowledgment, never as success.
#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgment {
    /// Whether the server acknowledged the operation.
    #[serde(default)]
    pub success: Option<bool>,
}

impl Acknowledgment {
    /// Reads the acknowledgment out of an already-decoded payload.
    ///
    /// Returns `false` when the payload is not an object or carries no
    /// positive `success` flag.
    pub fn confirms(value: &serde_json::Value) -> bool {
        serde_json::from_value::<Acknowledgment>(value.clone())
            .ok()
            .and_then(|ack| ack.success)
            .unwrap_or(false)
    }
}
