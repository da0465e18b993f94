//! AWS SDK implementation of the store boundary.
//!
//! One [`AwsObjectStore`] is connected per fetch request: locators may
//! carry their own static credentials, so client reuse across requests is
//! not possible in general. Credential resolution follows the SDK's
//! default chain unless the request pins static keys or a role to assume.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::sts::AssumeRoleProvider;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::StoreError;
use crate::gateway::{CredentialSpec, ObjectMetadata, ObjectStore, StoreEndpoint, StoreProvider};

/// STS session name used when assuming a role.
const SESSION_NAME: &str = "apt-s3-method";

/// Connects [`AwsObjectStore`] instances through `aws-config`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsStoreProvider;

#[async_trait]
impl StoreProvider for AwsStoreProvider {
    async fn connect(
        &self,
        endpoint: &StoreEndpoint,
        credentials: CredentialSpec,
    ) -> Result<Arc<dyn ObjectStore>, StoreError> {
        let region = Region::new(endpoint.region.clone());
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region.clone());

        match credentials {
            CredentialSpec::Static {
                access_key_id,
                secret_access_key,
            } => {
                debug!(access_key_id = %access_key_id, "using static credentials from locator");
                loader = loader.credentials_provider(Credentials::new(
                    access_key_id,
                    secret_access_key,
                    None,
                    None,
                    "apt-s3-locator",
                ));
            }
            CredentialSpec::AssumeRole { role_arn } => {
                debug!(role_arn = %role_arn, "assuming role via default credential chain");
                let provider = AssumeRoleProvider::builder(role_arn)
                    .region(region)
                    .session_name(SESSION_NAME)
                    .build()
                    .await;
                loader = loader.credentials_provider(provider);
            }
            CredentialSpec::Default => {}
        }

        let sdk_config = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(url) = &endpoint.endpoint_url {
            // S3-compatible stores rarely support virtual-hosted addressing.
            builder = builder.endpoint_url(url).force_path_style(true);
        }

        Ok(Arc::new(AwsObjectStore {
            client: Client::from_conf(builder.build()),
        }))
    }
}

/// An S3 client scoped to one endpoint and credential set.
#[derive(Debug)]
pub struct AwsObjectStore {
    client: Client,
}

#[async_trait]
impl ObjectStore for AwsObjectStore {
    async fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, StoreError> {
        let output = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(HeadObjectError::is_not_found) {
                    StoreError::NotFound
                } else {
                    StoreError::service(anyhow::anyhow!("{}", DisplayErrorContext(&err)))
                }
            })?;

        let size = output.content_length().unwrap_or_default();
        let last_modified = output
            .last_modified()
            .and_then(|t| timestamp_to_utc(t.secs(), t.subsec_nanos()))
            .ok_or_else(|| {
                StoreError::service(anyhow::anyhow!(
                    "HeadObject response for {bucket}/{key} is missing Last-Modified"
                ))
            })?;

        Ok(ObjectMetadata {
            size,
            last_modified,
        })
    }

    async fn download(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, StoreError> {
        let mut output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(GetObjectError::is_no_such_key) {
                    StoreError::NotFound
                } else {
                    StoreError::service(anyhow::anyhow!("{}", DisplayErrorContext(&err)))
                }
            })?;

        let mut file = tokio::fs::File::create(dest).await.map_err(StoreError::service)?;
        let mut written: u64 = 0;
        while let Some(chunk) = output.body.try_next().await.map_err(StoreError::service)? {
            file.write_all(&chunk).await.map_err(StoreError::service)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(StoreError::service)?;

        debug!(bucket = %bucket, key = %key, bytes = written, "download complete");
        Ok(written)
    }
}

/// Convert an epoch seconds/nanos pair into a UTC timestamp.
fn timestamp_to_utc(secs: i64, nanos: u32) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(secs, nanos)
}
