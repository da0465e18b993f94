//! The store boundary consumed by the request engine.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// Metadata returned by an existence/metadata lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// Object size in bytes.
    pub size: i64,
    /// Last modification timestamp.
    pub last_modified: DateTime<Utc>,
}

/// How the store should resolve credentials for a request.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSpec {
    /// Static access key pair carried in the resource locator.
    Static {
        /// The access key ID.
        access_key_id: String,
        /// The secret access key.
        secret_access_key: String,
    },
    /// Assume the given role via the ambient default credential chain.
    AssumeRole {
        /// The role ARN to assume.
        role_arn: String,
    },
    /// The ambient default credential chain, unmodified.
    Default,
}

impl fmt::Debug for CredentialSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &"[REDACTED]")
                .finish(),
            Self::AssumeRole { role_arn } => {
                f.debug_struct("AssumeRole").field("role_arn", role_arn).finish()
            }
            Self::Default => f.write_str("Default"),
        }
    }
}

/// Where the store lives: a region plus an optional endpoint override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEndpoint {
    /// The region used for signing and endpoint defaulting.
    pub region: String,
    /// Explicit endpoint URL, for S3-compatible stores. When set, the
    /// region-derived default is not used.
    pub endpoint_url: Option<String>,
}

/// A connected object store, scoped to one endpoint and one set of
/// credentials.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Look up object metadata without fetching the body.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key does not exist; any other
    /// variant for every other failure.
    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, StoreError>;

    /// Stream the object into the file at `dest`, overwriting it if
    /// present. Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the key vanished since the metadata
    /// lookup; any other variant for transport or local I/O failures.
    async fn download(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, StoreError>;
}

/// Connects [`ObjectStore`] instances for a given endpoint and credential
/// specification. One connection is made per fetch request, since each
/// locator may carry its own static credentials.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    /// Resolve credentials and build a store handle.
    ///
    /// # Errors
    ///
    /// [`StoreError::Credentials`] if credential resolution fails, or
    /// [`StoreError::Service`] for any other connection failure.
    async fn connect(
        &self,
        endpoint: &StoreEndpoint,
        credentials: CredentialSpec,
    ) -> Result<Arc<dyn ObjectStore>, StoreError>;
}
