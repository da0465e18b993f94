//! Object store gateway for the apt-s3 method.
//!
//! The request engine only needs four capabilities from the store:
//! existence/metadata lookup, streamed download, credential resolution,
//! and region-to-endpoint defaulting. This crate defines that boundary
//! ([`ObjectStore`], [`StoreProvider`]) and ships the production
//! implementation backed by `aws-sdk-s3`. Everything transport-level —
//! TLS, signing, retries — stays inside the SDK.

mod aws;
mod endpoint;
mod error;
mod gateway;

pub use aws::{AwsObjectStore, AwsStoreProvider};
pub use endpoint::{DEFAULT_REGION, default_endpoint_for};
pub use error::StoreError;
pub use gateway::{CredentialSpec, ObjectMetadata, ObjectStore, StoreEndpoint, StoreProvider};
