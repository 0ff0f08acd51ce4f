//! Wire models for the mobile API.
//!
//! This module contains the typed envelopes and request bodies the client
//! exchanges with the gateway, plus a typed view of the grade-report
//! payload. Domain read operations otherwise return the decoded JSON
//! un-normalized, since most payload shapes are undocumented.

mod homework;
mod messaging;
mod releve;
mod session;

pub use homework::*;
pub use messaging::*;
pub use releve::*;
pub use session::*;
