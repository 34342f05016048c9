//! Amazon S3 backend.

use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

use super::ObjectStore;
use crate::config::StorageConfig;
use crate::error::StorageError;

/// [`ObjectStore`] backed by the AWS SDK client.
///
/// The SDK client pools connections internally and is cheap to clone, so one
/// store is built at process start and reused by every invocation.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Wrap an already configured SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS environment (credentials, region),
    /// applying the region override from configuration when set.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;
        tracing::debug!(region = ?sdk_config.region(), "S3 client configured");
        Self::new(Client::new(&sdk_config))
    }
}

/// Map an SDK error code onto the storage taxonomy.
fn classify(code: Option<&str>, bucket: &str, key: &str, detail: String) -> StorageError {
    match code {
        Some("NoSuchKey") | Some("NoSuchBucket") | Some("NotFound") => StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        Some("AccessDenied") | Some("Forbidden") => StorageError::AccessDenied {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        _ => StorageError::Backend(detail),
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn name(&self) -> &str {
        "s3"
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(e.code(), bucket, key, DisplayErrorContext(&e).to_string()))?;

        // The body stream is consumed here; dropping it on error releases the connection.
        let body = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend(format!("reading body failed: {e}")))?;

        Ok(body.into_bytes())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| classify(e.code(), bucket, key, DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }
}
