//! Error type for the request engine.

use apt_s3_protocol::ProtocolError;
use apt_s3_store::StoreError;

use crate::location::LocationError;

/// Everything that can go wrong while servicing the protocol.
///
/// With the single exception of the store's not-found signal (handled
/// in-line by the fetch path, never surfaced as an error), any
/// `MethodError` reaching the run loop is process-fatal: one
/// `401 General Failure` is emitted and the process exits non-zero.
#[derive(Debug, thiserror::Error)]
pub enum MethodError {
    /// An inbound message lacked a mandatory field.
    #[error("acquire message missing required field: {0}")]
    MissingField(&'static str),

    /// The locator carried an access key ID but no secret.
    #[error("acquire message missing required value: Password")]
    MissingPassword,

    /// The input stream produced an unparseable message.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A resource locator failed to resolve.
    #[error(transparent)]
    Location(#[from] LocationError),

    /// The configured or derived endpoint URL is unusable.
    #[error("parsing S3 endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        /// The endpoint URL that failed to parse.
        endpoint: String,
        /// The underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The configured or derived endpoint URL has no host.
    #[error("S3 endpoint {endpoint} has no host")]
    EndpointMissingHost {
        /// The offending endpoint URL.
        endpoint: String,
    },

    /// The store failed in a non-recoverable way.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The downloaded file could not be read back for digesting.
    #[error("reading downloaded file {path}: {source}")]
    ReadBack {
        /// The destination path that could not be read.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The output stream failed.
    #[error("writing to output stream: {0}")]
    Io(#[from] std::io::Error),
}
