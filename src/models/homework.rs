//! Homework mutation bodies.

use serde::Serialize;

/// Body of the homework completion-flag mutation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompletionFlag {
    /// Whether the work is marked done.
    #[serde(rename = "flagRealise")]
    pub done: bool,
}
