//! In-memory stores used by the `memory` backend for local development and by tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::ProfilesError;
use crate::models::user::User;
use crate::resources::blob_store::BlobStore;
use crate::resources::record_store::RecordStore;

#[derive(Default)]
pub struct MemoryRecordStore {
    users: DashMap<Uuid, User>,
    calls: AtomicUsize,
    write_failure: Mutex<Option<String>>,
    query_failure: Mutex<Option<String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryRecordStore {
    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.users.get(id).map(|user| user.value().clone())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Number of store operations served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Makes every following `put_user` fail with `message`.
    pub fn fail_writes(&self, message: impl Into<String>) -> Result<(), ProfilesError> {
        *self.write_failure.lock()? = Some(message.into());

        Ok(())
    }

    /// Makes every following `find_by_username` fail with `message`.
    pub fn fail_queries(&self, message: impl Into<String>) -> Result<(), ProfilesError> {
        *self.query_failure.lock()? = Some(message.into());

        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put_user(&self, user: &User) -> Result<(), ProfilesError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let write_failure = self.write_failure.lock()?.clone();

        if let Some(message) = write_failure {
            return Err(ProfilesError::RecordStoreError(message));
        }

        self.users.insert(user.id, user.clone());

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<User>, ProfilesError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let query_failure = self.query_failure.lock()?.clone();

        if let Some(message) = query_failure {
            return Err(ProfilesError::RecordStoreError(message));
        }

        let users = self
            .users
            .iter()
            .filter(|user| user.username == username)
            .map(|user| user.value().clone())
            .collect();

        Ok(users)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(not(test), allow(dead_code))]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

pub struct MemoryBlobStore {
    bucket: String,
    objects: DashMap<String, StoredObject>,
    calls: AtomicUsize,
    upload_failure: Mutex<Option<String>>,
}

impl MemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: DashMap::new(),
            calls: AtomicUsize::new(0),
            upload_failure: Mutex::new(None),
        }
    }
}

#[cfg(test)]
impl MemoryBlobStore {
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.get(key).map(|object| object.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Makes every following upload fail with `message`.
    pub fn fail_uploads(&self, message: impl Into<String>) -> Result<(), ProfilesError> {
        *self.upload_failure.lock()? = Some(message.into());

        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ProfilesError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        let upload_failure = self.upload_failure.lock()?.clone();

        if let Some(message) = upload_failure {
            return Err(ProfilesError::BlobStoreError(message));
        }

        self.objects.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );

        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        format!("memory://{}/{}", self.bucket, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::NewUser;

    fn user(username: &str) -> User {
        User::new(
            NewUser {
                username: username.to_string(),
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                profile_picture: vec![],
            },
            "memory://bucket/profile-images/1".to_string(),
        )
    }

    #[actix_web::test]
    async fn finds_every_user_sharing_a_username() {
        let store = MemoryRecordStore::new();
        store.put_user(&user("alice")).await.unwrap();
        store.put_user(&user("alice")).await.unwrap();
        store.put_user(&user("Alice")).await.unwrap();

        let found = store.find_by_username("alice").await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|user| user.username == "alice"));
    }

    #[actix_web::test]
    async fn failing_blob_store_keeps_nothing() {
        let store = MemoryBlobStore::new("bucket");
        store.fail_uploads("disk full").unwrap();

        let err = store.put_object("key", vec![1], "image/jpeg").await.unwrap_err();

        assert_eq!(err.to_string(), "Blob Store Error: disk full");
        assert_eq!(store.len(), 0);
        assert_eq!(store.calls(), 1);
    }
}
