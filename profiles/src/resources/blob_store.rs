use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::errors::ProfilesError;

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ProfilesError>;

    /// Public URL of the object stored under `key`.
    fn object_url(&self, key: &str) -> String;
}

pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, region: String) -> Self {
        Self { client, bucket, region }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ProfilesError> {
        let put_object = self
            .client
            .put_object()
            .key(key)
            .bucket(&self.bucket)
            .content_type(content_type);
        let body = ByteStream::from(bytes);

        put_object.body(body).send().await.map_err(|e| {
            ProfilesError::BlobStoreError(format!("Failed to upload to S3: {}", DisplayErrorContext(&e)))
        })?;

        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        s3_object_url(&self.bucket, &self.region, key)
    }
}

pub fn s3_object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_virtual_hosted_url() {
        assert_eq!(
            s3_object_url("avatars", "eu-west-1", "profile-images/abc"),
            "https://avatars.s3.eu-west-1.amazonaws.com/profile-images/abc"
        );
    }
}
