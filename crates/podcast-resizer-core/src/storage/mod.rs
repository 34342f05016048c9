//! Object storage seam.
//!
//! The pipeline reads and writes objects only through [`ObjectStore`]. The
//! process builds one store at start-up and hands it to the
//! [`ImageProcessor`](crate::pipeline::ImageProcessor); tests substitute
//! [`MemoryStore`].

pub mod memory;
pub mod s3;

pub use memory::{MemoryStore, StoredObject};
pub use s3::S3Store;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StorageError;

/// Whole-object reads and writes against a bucket.
///
/// Uses `async_trait` so the store can also be used as `Box<dyn ObjectStore>`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name for logging (e.g., "s3", "memory").
    fn name(&self) -> &str;

    /// Return the full content of an object. The response body is drained
    /// before this returns.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;

    /// Create or overwrite an object.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        (**self).get_object(bucket, key).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), StorageError> {
        (**self).put_object(bucket, key, content_type, body).await
    }
}
