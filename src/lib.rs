//! # kdecole
//!
//! Client for the Kdecole ENT mobile API, the backend serving the mobile
//! applications of Skolengo school platforms (Mon Bureau Numérique,
//! Mon ENT Occitanie, ECLAT-BFC, ...).
//!
//! It authenticates a user, holds the session token, and exposes accessors
//! for student records: grades, absences, homework, messaging, and
//! schedules.
//!
//! ## Features
//!
//! - **Authentication**: token activation from single-use credentials,
//!   session validation, token revocation
//! - **Student records**: grade reports, recent grades, absences,
//!   timetable, news, homework (with time filtering)
//! - **Messaging**: mailbox summary, inbox, thread detail, replies, read
//!   receipts, deletion, abuse reports
//! - **Security**: the session token is never logged and can be redacted
//!   from error text
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Institution endpoint registry (base URL + api version)
//! - [`request`] - Closed service vocabulary and deterministic path
//!   composition
//! - [`client`] - The session client, one method per API operation
//! - [`models`] - Wire envelopes, mutation bodies, and typed payload views
//! - [`error`] - Error types with token redaction
//!
//! ## Usage
//!
//! ```ignore
//! use kdecole::client::Kdecole;
//! use kdecole::config::Institution;
//! use kdecole::request::{NotBefore, Selector};
//!
//! async fn example() -> Result<(), kdecole::error::KdecoleError> {
//!     let endpoint = Institution::MonBureauNumerique.endpoint();
//!
//!     // The activation password is single-use; store the token instead.
//!     let token = Kdecole::login("username", "password", &endpoint).await?;
//!
//!     let client = Kdecole::new(token, 0, &endpoint)?;
//!     let homework = client
//!         .homework(&Selector::OwnAccount, NotBefore::Unbounded)
//!         .await?;
//!     println!("{homework}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Security Considerations
//!
//! The session token grants full access to the account. It is:
//!
//! - Attached to every request in the `X-Api-Auth` header
//! - Never logged at any log level
//! - Never persisted by the crate; the caller owns storage
//!
//! Login credentials travel URL-embedded, as the gateway's activation
//! contract requires; treat the activation password as sensitive.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod request;
