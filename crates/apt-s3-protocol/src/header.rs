//! Message status codes and headers.

use std::fmt;

/// The fixed vocabulary of status codes defined by the APT method interface.
///
/// Codes below 600 flow from the method to APT; 600 and above flow from APT
/// to the method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// `100 Capabilities` — startup announcement.
    Capabilities,
    /// `101 Log` — informational log line.
    Log,
    /// `102 Status` — progress report for a URI.
    Status,
    /// `200 URI Start` — a fetch has begun.
    UriStart,
    /// `201 URI Done` — a fetch completed successfully.
    UriDone,
    /// `400 URI Failure` — a single fetch failed.
    UriFailure,
    /// `401 General Failure` — the method is giving up.
    GeneralFailure,
    /// `600 URI Acquire` — APT requests a fetch.
    UriAcquire,
    /// `601 Configuration` — APT pushes its configuration space.
    Configuration,
}

impl StatusCode {
    /// The numeric wire code.
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::Capabilities => 100,
            Self::Log => 101,
            Self::Status => 102,
            Self::UriStart => 200,
            Self::UriDone => 201,
            Self::UriFailure => 400,
            Self::GeneralFailure => 401,
            Self::UriAcquire => 600,
            Self::Configuration => 601,
        }
    }

    /// The human-readable description paired with the code on the wire.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Capabilities => "Capabilities",
            Self::Log => "Log",
            Self::Status => "Status",
            Self::UriStart => "URI Start",
            Self::UriDone => "URI Done",
            Self::UriFailure => "URI Failure",
            Self::GeneralFailure => "General Failure",
            Self::UriAcquire => "URI Acquire",
            Self::Configuration => "Configuration",
        }
    }

    /// Look up a known status code by its numeric value.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            100 => Some(Self::Capabilities),
            101 => Some(Self::Log),
            102 => Some(Self::Status),
            200 => Some(Self::UriStart),
            201 => Some(Self::UriDone),
            400 => Some(Self::UriFailure),
            401 => Some(Self::GeneralFailure),
            600 => Some(Self::UriAcquire),
            601 => Some(Self::Configuration),
            _ => None,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.description())
    }
}

/// The status line of a message: numeric code plus description.
///
/// Outbound headers are constructed from [`StatusCode`]; inbound headers
/// keep whatever code and description arrived on the wire so that unknown
/// message types round-trip instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    status: u16,
    description: String,
}

impl Header {
    /// Create a header from a raw code and description.
    #[must_use]
    pub fn new(status: u16, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
        }
    }

    /// The numeric status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Classify this header against the known code vocabulary.
    ///
    /// Returns `None` for codes outside the fixed set, which the engine
    /// ignores rather than rejects.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_code(self.status)
    }
}

impl From<StatusCode> for Header {
    fn from(code: StatusCode) -> Self {
        Self::new(code.code(), code.description())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.description)
    }
}
