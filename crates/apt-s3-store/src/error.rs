//! Error types for the store gateway.

/// Errors surfaced across the store boundary.
///
/// Only [`StoreError::NotFound`] is recoverable per request; the engine
/// treats every other variant as fatal to the whole process.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The object does not exist in the store.
    #[error("object not found")]
    NotFound,

    /// Credential resolution failed.
    #[error("resolving store credentials: {0}")]
    Credentials(#[source] anyhow::Error),

    /// Any other store failure: connection, signing, throttling, a local
    /// I/O error while sinking a download, or an unexpected response.
    #[error("object store error: {0}")]
    Service(#[source] anyhow::Error),
}

impl StoreError {
    /// Wrap an opaque failure as a service error.
    pub fn service(err: impl Into<anyhow::Error>) -> Self {
        Self::Service(err.into())
    }

    /// True if this is the store's "object not found" signal.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
