//! HTTP client for the Kdecole mobile API.
//!
//! This module provides the `Kdecole` struct: an immutable session
//! identity (token, api version, establishment id, base URL) plus one
//! method per API operation. Every operation is a single stateless HTTP
//! round-trip built by a shared request builder; nothing is retried,
//! cached, or paginated.
//!
//! # Security
//!
//! The session token grants full access to the account. It is attached to
//! every request but never logged.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

use crate::config::Endpoint;
use crate::error::KdecoleError;
use crate::models::{Acknowledgment, ActivationResponse, CompletionFlag, NewParticipation, ReadReceipt};
use crate::request::{establishment_segments, NotBefore, RequestDescriptor, Selector, Service};

/// Header carrying the session token.
const AUTH_HEADER: &str = "X-Api-Auth";

/// Header carrying the mobile application version.
const VERSION_HEADER: &str = "X-Api-Vers";

/// Session client for the Kdecole mobile API.
///
/// Holds the immutable session identity and issues one HTTP round-trip per
/// operation. The client has no mutable state after construction, so a
/// single instance can serve concurrent tasks, and several instances (one
/// per user) can coexist independently.
///
/// # Example
///
/// ```ignore
/// use kdecole::client::Kdecole;
/// use kdecole::config::Institution;
/// use kdecole::request::Selector;
///
/// let endpoint = Institution::MonBureauNumerique.endpoint();
/// let token = Kdecole::login("username", "password", &endpoint).await?;
/// let client = Kdecole::new(token, 0, &endpoint)?;
///
/// let grades = client.grades(&Selector::OwnAccount).await?;
/// ```
#[derive(Clone)]
pub struct Kdecole {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Session token issued by [`Kdecole::login`].
    /// SECURITY: Never log this value!
    token: String,

    /// Mobile application version the gateway expects.
    api_version: String,

    /// Establishment scoping identifier for unparameterized calls.
    establishment_id: u64,

    /// Base URL of the institution's mobile gateway.
    base_url: String,
}

impl Kdecole {
    /// Creates a session client from an already-issued token.
    ///
    /// The token comes from a prior [`Kdecole::login`] or from storage the
    /// caller manages; the client never persists it.
    ///
    /// # Errors
    ///
    /// Returns `KdecoleError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(
        token: impl Into<String>,
        establishment_id: u64,
        endpoint: &Endpoint,
    ) -> Result<Self, KdecoleError> {
        let http = Client::builder().build().map_err(KdecoleError::HttpClient)?;
        Ok(Self::with_http_client(http, token, establishment_id, endpoint))
    }

    /// Creates a session client over a caller-configured transport.
    ///
    /// The client defines no timeout or cancellation policy of its own;
    /// configure those on the `reqwest::Client` passed here.
    pub fn with_http_client(
        http: Client,
        token: impl Into<String>,
        establishment_id: u64,
        endpoint: &Endpoint,
    ) -> Self {
        Self {
            http,
            token: token.into(),
            api_version: endpoint.api_version().to_string(),
            establishment_id,
            base_url: endpoint.base_url().to_string(),
        }
    }

    /// Asks the gateway to issue a new session token for the user.
    ///
    /// Issues an unauthenticated GET to the activation path. Both
    /// credentials travel URL-embedded (percent-encoded); treat the
    /// password accordingly and prefer single-use activation passwords.
    ///
    /// # Errors
    ///
    /// Returns `KdecoleError::Authentication` when the gateway rejects the
    /// credentials or answers with anything but the expected activation
    /// envelope; `KdecoleError::Transport` on network failure. A partial
    /// token is never returned.
    pub async fn login(
        username: &str,
        password: &str,
        endpoint: &Endpoint,
    ) -> Result<String, KdecoleError> {
        let http = Client::builder().build().map_err(KdecoleError::HttpClient)?;
        let url = format!(
            "{}/activation/{}/{}/",
            endpoint.base_url(),
            urlencoding::encode(username),
            urlencoding::encode(password),
        );

        tracing::debug!(service = "activation", "requesting a new session token");

        let response = http
            .get(&url)
            .header(AUTH_HEADER, "")
            .header(VERSION_HEADER, endpoint.api_version())
            .send()
            .await
            .map_err(KdecoleError::Transport)?;

        let body = response.text().await.map_err(KdecoleError::Transport)?;

        // A malformed body means the activation was not granted; it must
        // surface as a rejected login, not as a decoding failure.
        let activation: ActivationResponse = match serde_json::from_str(&body) {
            Ok(activation) => activation,
            Err(_) => return Err(KdecoleError::Authentication),
        };

        match activation {
            ActivationResponse {
                success: true,
                authtoken: Some(token),
            } => Ok(token),
            _ => Err(KdecoleError::Authentication),
        }
    }

    // ========================================================================
    // Session operations
    // ========================================================================

    /// Verifies that the token and application version are still valid.
    ///
    /// The mobile application performs this call on startup. The gateway
    /// answers with a bare status code: 204 when the session is valid.
    ///
    /// # Errors
    ///
    /// Returns `KdecoleError::Authentication` on HTTP 403,
    /// `KdecoleError::Request` on any other status.
    pub async fn session_check(&self) -> Result<(), KdecoleError> {
        self.probe(RequestDescriptor::get(Service::Starting)).await
    }

    /// Revokes the session token.
    ///
    /// # Errors
    ///
    /// Returns `KdecoleError::Authentication` when the gateway reports the
    /// revocation as unsuccessful.
    pub async fn logout(&self) -> Result<(), KdecoleError> {
        let value = self.fetch(RequestDescriptor::get(Service::Deactivation)).await?;
        if Acknowledgment::confirms(&value) {
            Ok(())
        } else {
            Err(KdecoleError::Authentication)
        }
    }

    // ========================================================================
    // Student records
    // ========================================================================

    /// Returns the grade report: a list of grading periods with per-subject
    /// averages.
    ///
    /// See [`crate::models::ReportPeriod`] for a typed view of the payload.
    pub async fn grade_report(&self, selector: &Selector) -> Result<Value, KdecoleError> {
        self.fetch(
            RequestDescriptor::get(Service::GradeReport).with_segments(selector.segments()),
        )
        .await
    }

    /// Returns the student's most recent grades.
    pub async fn grades(&self, selector: &Selector) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::Grades).with_segments(selector.segments()))
            .await
    }

    /// Returns the student's absence records.
    pub async fn absences(&self, selector: &Selector) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::Absences).with_segments(selector.segments()))
            .await
    }

    /// Returns the timetable, seven days back and seven days ahead.
    pub async fn schedule(&self, selector: &Selector) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::Schedule).with_segments(selector.segments()))
            .await
    }

    /// Returns the establishment's news feed.
    pub async fn news(&self, selector: &Selector) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::News).with_segments(selector.segments()))
            .await
    }

    /// Returns the content of an article published by the establishment.
    pub async fn article_content(&self, uid: &str) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::ArticleContent).with_segments(vec![
            "article".to_string(),
            urlencoding::encode(uid).into_owned(),
        ]))
        .await
    }

    /// Returns the content of an information notice published by the
    /// platform itself.
    pub async fn information_content(&self, uid: &str) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::ArticleContent).with_segments(vec![
            "information".to_string(),
            urlencoding::encode(uid).into_owned(),
        ]))
        .await
    }

    /// Returns account information: account type, full name, establishment
    /// number.
    ///
    /// With [`Selector::OwnAccount`] the call is scoped by the token alone.
    pub async fn user_info(&self, selector: &Selector) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::UserInfo).with_segments(selector.segments()))
            .await
    }

    /// Returns the attendance call sheets of the establishment.
    pub async fn call_sheets(&self) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::CallSheets)).await
    }

    // ========================================================================
    // Homework
    // ========================================================================

    /// Returns the homework listing, optionally bounded in time.
    ///
    /// The selector and the bound combine into up to four path shapes
    /// (`establishment/{id}`, `student/{sid}`, each with or without a
    /// trailing epoch-millisecond segment); all four are part of the wire
    /// contract.
    pub async fn homework(
        &self,
        selector: &Selector,
        not_before: NotBefore,
    ) -> Result<Value, KdecoleError> {
        let segments = self.homework_segments(selector, not_before);
        self.fetch(RequestDescriptor::get(Service::Homework).with_segments(segments))
            .await
    }

    /// Returns the detail of one piece of homework.
    pub async fn homework_content(
        &self,
        session_uid: u64,
        uid: u64,
        selector: &Selector,
    ) -> Result<Value, KdecoleError> {
        let mut segments = selector.segments();
        if segments.is_empty() {
            segments = establishment_segments(self.establishment_id);
        }
        segments.push(session_uid.to_string());
        segments.push(uid.to_string());
        self.fetch(RequestDescriptor::get(Service::HomeworkContent).with_segments(segments))
            .await
    }

    /// Marks a piece of homework done (or not done).
    ///
    /// # Errors
    ///
    /// Returns `KdecoleError::Request` when the gateway does not
    /// acknowledge the change.
    pub async fn set_homework_done(
        &self,
        session_uid: u64,
        uid: u64,
        done: bool,
    ) -> Result<Value, KdecoleError> {
        let mut segments = establishment_segments(self.establishment_id);
        segments.push(session_uid.to_string());
        segments.push(uid.to_string());
        self.acknowledge(
            RequestDescriptor::put(Service::HomeworkDone, &CompletionFlag { done })
                .with_segments(segments),
        )
        .await
    }

    // ========================================================================
    // Messaging
    // ========================================================================

    /// Returns the mailbox summary (unread count).
    pub async fn mailbox_info(&self) -> Result<Value, KdecoleError> {
        self.fetch(RequestDescriptor::get(Service::MailboxInfo)).await
    }

    /// Returns the inbox thread listing.
    ///
    /// `offset` skips that many threads from the top of the list to reach
    /// further into the past; 0 returns the most recent threads.
    pub async fn inbox(&self, offset: u32) -> Result<Value, KdecoleError> {
        let segments = if offset == 0 {
            Vec::new()
        } else {
            vec![offset.to_string()]
        };
        self.fetch(RequestDescriptor::get(Service::Inbox).with_segments(segments))
            .await
    }

    /// Returns the detail of one discussion thread.
    pub async fn thread(&self, thread_id: u64) -> Result<Value, KdecoleError> {
        self.fetch(
            RequestDescriptor::get(Service::Thread).with_segments(vec![thread_id.to_string()]),
        )
        .await
    }

    /// Marks a discussion thread as read.
    pub async fn mark_thread_read(&self, thread_id: u64) -> Result<Value, KdecoleError> {
        self.acknowledge(
            RequestDescriptor::put(Service::ThreadRead, &ReadReceipt::default())
                .with_segments(vec![thread_id.to_string()]),
        )
        .await
    }

    /// Posts a message on an existing discussion thread.
    pub async fn reply_to_thread(
        &self,
        thread_id: u64,
        message: &str,
    ) -> Result<Value, KdecoleError> {
        let sent_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or_default();
        self.acknowledge(
            RequestDescriptor::put(
                Service::ThreadReply,
                &NewParticipation {
                    sent_at,
                    body: message.to_string(),
                },
            )
            .with_segments(vec![thread_id.to_string()]),
        )
        .await
    }

    /// Deletes a discussion thread.
    pub async fn delete_thread(&self, thread_id: u64) -> Result<Value, KdecoleError> {
        self.acknowledge(
            RequestDescriptor::delete(Service::ThreadDelete)
                .with_segments(vec![thread_id.to_string()]),
        )
        .await
    }

    /// Reports a discussion thread to the establishment moderators.
    pub async fn report_thread(&self, thread_id: u64) -> Result<Value, KdecoleError> {
        self.acknowledge(
            RequestDescriptor::put(Service::ThreadReport, &serde_json::Map::new())
                .with_segments(vec![thread_id.to_string()]),
        )
        .await
    }

    // ========================================================================
    // Shared request builder
    // ========================================================================

    /// Path segments of the homework listing for a (selector, bound) pair.
    ///
    /// When a time bound is present the establishment scope must be
    /// materialized here, so that the bound lands after it; the builder's
    /// auto-injection only fires on an empty segment list.
    fn homework_segments(&self, selector: &Selector, not_before: NotBefore) -> Vec<String> {
        let mut segments = selector.segments();
        if let NotBefore::Epoch(millis) = not_before {
            if segments.is_empty() {
                segments = establishment_segments(self.establishment_id);
            }
            segments.push(millis.to_string());
        }
        segments
    }

    /// Assembles and issues one round-trip from a descriptor.
    async fn send(&self, descriptor: &RequestDescriptor) -> Result<Response, KdecoleError> {
        let url = descriptor.url(&self.base_url, self.establishment_id);

        tracing::debug!(
            method = %descriptor.method,
            service = descriptor.service.path(),
            path = %descriptor.path(self.establishment_id),
            "issuing API request"
        );

        self.http
            .request(descriptor.method.clone(), &url)
            .header(AUTH_HEADER, self.token.as_str())
            .header(VERSION_HEADER, self.api_version.as_str())
            .json(&descriptor.body)
            .send()
            .await
            .map_err(KdecoleError::Transport)
    }

    /// Simple read: returns the decoded JSON payload un-normalized.
    async fn fetch(&self, descriptor: RequestDescriptor) -> Result<Value, KdecoleError> {
        let service = descriptor.service.path();
        let response = self.send(&descriptor).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(KdecoleError::Authentication);
        }
        if !status.is_success() {
            return Err(KdecoleError::request(service, status));
        }

        let body = response.text().await.map_err(KdecoleError::Transport)?;
        tracing::trace!(service, body = %body, "API response");

        serde_json::from_str(&body).map_err(|source| KdecoleError::decode(service, source))
    }

    /// Status-only call: the body is ignored, only the status code counts.
    async fn probe(&self, descriptor: RequestDescriptor) -> Result<(), KdecoleError> {
        let service = descriptor.service.path();
        let response = self.send(&descriptor).await?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::FORBIDDEN => Err(KdecoleError::Authentication),
            status => Err(KdecoleError::request(service, status)),
        }
    }

    /// Acknowledged mutation: the decoded body must confirm the change.
    async fn acknowledge(&self, descriptor: RequestDescriptor) -> Result<Value, KdecoleError> {
        let service = descriptor.service.path();
        let value = self.fetch(descriptor).await?;
        if Acknowledgment::confirms(&value) {
            Ok(value)
        } else {
            Err(KdecoleError::rejected(service))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Creates a client for unit tests without touching the network.
    fn test_client(establishment_id: u64) -> Kdecole {
        Kdecole {
            http: Client::new(),
            token: "test_token".to_string(),
            api_version: "3.7.14".to_string(),
            establishment_id,
            base_url: "https://mobilite.example.com/mobilite".to_string(),
        }
    }

    #[test]
    fn test_homework_segments_own_account_unbounded() {
        let client = test_client(4);
        // empty: the builder injects the establishment scope itself
        assert!(client
            .homework_segments(&Selector::OwnAccount, NotBefore::Unbounded)
            .is_empty());
    }

    #[test]
    fn test_homework_segments_own_account_bounded() {
        let client = test_client(4);
        let segments =
            client.homework_segments(&Selector::OwnAccount, NotBefore::Epoch(1_700_000_000_000));
        assert_eq!(segments, vec!["establishment", "4", "1700000000000"]);
    }

    #[test]
    fn test_homework_segments_student_unbounded() {
        let client = test_client(4);
        let segments =
            client.homework_segments(&Selector::student("E123"), NotBefore::Unbounded);
        assert_eq!(segments, vec!["student", "E123"]);
    }

    #[test]
    fn test_homework_segments_student_bounded() {
        let client = test_client(4);
        let segments = client
            .homework_segments(&Selector::student("E123"), NotBefore::Epoch(1_700_000_000_000));
        assert_eq!(segments, vec!["student", "E123", "1700000000000"]);
    }

    #[test]
    fn test_identity_is_copied_from_endpoint() {
        let endpoint = Endpoint::new("3.7.14", "https://mobilite.example.com/mobilite").unwrap();
        let client = Kdecole::new("T", 9, &endpoint).unwrap();
        assert_eq!(client.token, "T");
        assert_eq!(client.api_version, "3.7.14");
        assert_eq!(client.establishment_id, 9);
        assert_eq!(client.base_url, "https://mobilite.example.com/mobilite");
    }
}
