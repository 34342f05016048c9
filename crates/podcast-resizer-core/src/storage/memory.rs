//! In-memory backend for tests and local runs.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ObjectStore;
use crate::error::StorageError;

/// An object held by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: Option<String>,
    pub body: Bytes,
}

type Objects = HashMap<(String, String), StoredObject>;

/// [`ObjectStore`] keeping objects in a shared map.
///
/// Clones share the same objects, so a test can keep one handle for
/// inspection while the processor owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<Objects>>,
    deny_writes: Arc<AtomicBool>,
    puts: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn objects(&self) -> MutexGuard<'_, Objects> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed an object without counting it as a pipeline write.
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Bytes>) {
        self.objects().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                content_type: None,
                body: body.into(),
            },
        );
    }

    /// Look up an object.
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// All keys stored in a bucket, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Make every subsequent `put_object` fail with access denied.
    pub fn deny_writes(&self, deny: bool) {
        self.deny_writes.store(deny, Ordering::SeqCst);
    }

    /// Number of successful `put_object` calls.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        self.get(bucket, key)
            .map(|object| object.body)
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), StorageError> {
        if self.deny_writes.load(Ordering::SeqCst) {
            return Err(StorageError::AccessDenied {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        self.objects().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                content_type: Some(content_type.to_string()),
                body,
            },
        );
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
