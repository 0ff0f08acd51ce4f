//! Request descriptors for the mobile API.
//!
//! The remote service addresses every operation with a fixed service-name
//! path segment followed by optional parameter segments, closed by a
//! trailing slash. This module enumerates the full service vocabulary,
//! classifies how each service is scoped when the caller passes no
//! parameters, and composes the final request path deterministically.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// The closed set of services the client can address.
///
/// Adding a variant forces a scoping classification in
/// [`Service::scoping`]; a service can not exist without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Service {
    /// Token/app-version validity probe (`starting`).
    Starting,
    /// Token revocation (`desactivation`).
    Deactivation,
    /// Grade report by term (`consulterReleves`).
    GradeReport,
    /// Recent grades (`consulterNotes`).
    Grades,
    /// Absence records (`consulterAbsences`).
    Absences,
    /// Timetable, seven days around today (`calendrier`).
    Schedule,
    /// Establishment news feed (`actualites`).
    News,
    /// Article or platform-information content (`contenuArticle`).
    ArticleContent,
    /// Homework listing (`travailAFaire`).
    Homework,
    /// Homework detail (`contenuactivite`).
    HomeworkContent,
    /// Homework completion flag (`contenuActivite`, mutation).
    HomeworkDone,
    /// Account information (`infoutilisateur`).
    UserInfo,
    /// Mailbox summary (`messagerie/info`).
    MailboxInfo,
    /// Inbox thread listing (`messagerie/boiteReception`).
    Inbox,
    /// Thread detail (`messagerie/communication`).
    Thread,
    /// Thread read receipt (`messagerie/communication/lu`).
    ThreadRead,
    /// New message on a thread (`messagerie/communication/nouvelleParticipation`).
    ThreadReply,
    /// Thread deletion (`messagerie/communication/supprimer`).
    ThreadDelete,
    /// Thread abuse report (`messagerie/communication/signaler`).
    ThreadReport,
    /// Attendance call sheets (`gestionAppels`).
    CallSheets,
}

/// How the request builder scopes a service when the caller supplies no
/// parameter segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scoping {
    /// Inject `establishment/{establishmentId}` as the parameters.
    Establishment,
    /// Leave the path bare: the operation is establishment-agnostic or
    /// already scoped by the token itself.
    None,
}

impl Service {
    /// The fixed service-name segment of the path.
    pub(crate) const fn path(self) -> &'static str {
        match self {
            Service::Starting => "starting",
            Service::Deactivation => "desactivation",
            Service::GradeReport => "consulterReleves",
            Service::Grades => "consulterNotes",
            Service::Absences => "consulterAbsences",
            Service::Schedule => "calendrier",
            Service::News => "actualites",
            Service::ArticleContent => "contenuArticle",
            Service::Homework => "travailAFaire",
            Service::HomeworkContent => "contenuactivite",
            Service::HomeworkDone => "contenuActivite",
            Service::UserInfo => "infoutilisateur",
            Service::MailboxInfo => "messagerie/info",
            Service::Inbox => "messagerie/boiteReception",
            Service::Thread => "messagerie/communication",
            Service::ThreadRead => "messagerie/communication/lu",
            Service::ThreadReply => "messagerie/communication/nouvelleParticipation",
            Service::ThreadDelete => "messagerie/communication/supprimer",
            Service::ThreadReport => "messagerie/communication/signaler",
            Service::CallSheets => "gestionAppels",
        }
    }

    /// Scoping classification, fixed per service.
    ///
    /// The `Scoping::None` set must match the remote gateway's observed
    /// behavior exactly; it is part of the wire contract.
    pub(crate) const fn scoping(self) -> Scoping {
        match self {
            Service::Starting
            | Service::Deactivation
            | Service::MailboxInfo
            | Service::Thread
            | Service::Inbox
            | Service::UserInfo => Scoping::None,
            Service::GradeReport
            | Service::Grades
            | Service::Absences
            | Service::Schedule
            | Service::News
            | Service::ArticleContent
            | Service::Homework
            | Service::HomeworkContent
            | Service::HomeworkDone
            | Service::ThreadRead
            | Service::ThreadReply
            | Service::ThreadDelete
            | Service::ThreadReport
            | Service::CallSheets => Scoping::Establishment,
        }
    }
}

/// Narrows a student-scoped operation to one student instead of the
/// authenticated account's own scope.
///
/// Parent accounts carry several students; `Student` selects one of them.
/// With `OwnAccount` the call targets the authenticated user and the
/// establishment scoping of the service applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    /// The authenticated account itself.
    #[default]
    OwnAccount,
    /// One specific student, by opaque identifier.
    Student(String),
}

impl Selector {
    /// Selects a specific student.
    pub fn student(id: impl Into<String>) -> Self {
        Selector::Student(id.into())
    }

    /// Path segments this selector contributes, empty for `OwnAccount`.
    pub(crate) fn segments(&self) -> Vec<String> {
        match self {
            Selector::OwnAccount => Vec::new(),
            Selector::Student(id) => {
                vec!["student".to_string(), urlencoding::encode(id).into_owned()]
            }
        }
    }
}

/// Lower time bound for the homework listing.
///
/// When bounded, the instant is appended to the path as milliseconds since
/// the Unix epoch, after the student or establishment segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotBefore {
    /// No lower bound; the full listing is returned.
    #[default]
    Unbounded,
    /// Only work due on or after this instant, in epoch milliseconds.
    Epoch(u64),
}

impl NotBefore {
    /// Bounds the listing at a wall-clock instant.
    ///
    /// Instants before the Unix epoch carry no meaningful bound and
    /// resolve to `Unbounded`.
    pub fn since(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => NotBefore::Epoch(elapsed.as_millis() as u64),
            Err(_) => NotBefore::Unbounded,
        }
    }
}

/// One API round-trip, fully described.
///
/// Descriptors are built fresh per call, consumed immediately by the
/// transport, and never persisted. Path resolution is a pure function of
/// (service, segments, establishment id), so identical inputs always
/// produce identical requests.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RequestDescriptor {
    pub(crate) service: Service,
    pub(crate) segments: Vec<String>,
    pub(crate) method: Method,
    pub(crate) body: Value,
}

impl RequestDescriptor {
    /// A GET with no parameters and an empty JSON body.
    pub(crate) fn get(service: Service) -> Self {
        Self {
            service,
            segments: Vec::new(),
            method: Method::GET,
            body: Value::Object(serde_json::Map::new()),
        }
    }

    /// A PUT carrying a JSON body.
    pub(crate) fn put(service: Service, body: &impl Serialize) -> Self {
        Self {
            service,
            segments: Vec::new(),
            method: Method::PUT,
            body: serde_json::to_value(body)
                .unwrap_or_else(|_| Value::Object(serde_json::Map::new())),
        }
    }

    /// A DELETE with an empty JSON body.
    pub(crate) fn delete(service: Service) -> Self {
        Self {
            service,
            segments: Vec::new(),
            method: Method::DELETE,
            body: Value::Object(serde_json::Map::new()),
        }
    }

    /// Replaces the parameter segments.
    pub(crate) fn with_segments(mut self, segments: Vec<String>) -> Self {
        self.segments = segments;
        self
    }

    /// Resolves the relative request path, with the trailing slash the
    /// gateway requires.
    ///
    /// When the descriptor carries no segments and the service is
    /// establishment-scoped, `establishment/{establishment_id}` is
    /// injected as the sole parameter segment.
    pub(crate) fn path(&self, establishment_id: u64) -> String {
        let injected;
        let segments: &[String] =
            if self.segments.is_empty() && self.service.scoping() == Scoping::Establishment {
                injected = establishment_segments(establishment_id);
                &injected
            } else {
                &self.segments
            };

        if segments.is_empty() {
            format!("{}/", self.service.path())
        } else {
            format!("{}/{}/", self.service.path(), segments.join("/"))
        }
    }

    /// Resolves the absolute request URL.
    pub(crate) fn url(&self, base_url: &str, establishment_id: u64) -> String {
        format!("{}/{}", base_url, self.path(establishment_id))
    }
}

/// The `establishment/{id}` parameter pair.
pub(crate) fn establishment_segments(establishment_id: u64) -> Vec<String> {
    vec!["establishment".to_string(), establishment_id.to_string()]
}
