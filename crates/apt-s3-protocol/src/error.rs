//! Error types for the wire model.

/// Errors produced while framing or parsing protocol messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The message block contained no status line.
    #[error("message is missing a status line")]
    MissingStatusLine,

    /// The status line did not match `<code> <description>`.
    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),

    /// A field line did not match `Name: Value`.
    #[error("malformed field line: {0:?}")]
    MalformedField(String),

    /// The underlying input stream failed.
    #[error("reading input stream: {0}")]
    Io(#[from] std::io::Error),
}
