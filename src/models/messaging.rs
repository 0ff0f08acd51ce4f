//! Messaging mutation bodies.

use serde::Serialize;

/// Body of the thread read-receipt mutation.
#[derive(Debug, Clone, Serialize)]
pub struct ReadReceipt {
    /// Always `"lu"`; the only action the service accepts.
    pub action: &'static str,
}

impl Default for ReadReceipt {
    fn default() -> Self {
        Self { action: "lu" }
    }
}

/// Body of a new message posted on an existing thread.
#[derive(Debug, Clone, Serialize)]
pub struct NewParticipation {
    /// Send instant, in seconds since the Unix epoch.
    #[serde(rename = "dateEnvoi")]
    pub sent_at: f64,

    /// Raw message body.
    #[serde(rename = "corpsMessage")]
    pub body: String,
}
