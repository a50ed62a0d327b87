use uuid::Uuid;

use crate::constants::{PROFILE_IMAGES_PREFIX, PROFILE_IMAGE_CONTENT_TYPE};

/// Profile picture blob. Stored once under a fresh key, never overwritten.
#[derive(Debug, Clone)]
pub struct ProfileImage {
    pub key: String,
    pub bytes: Vec<u8>,
}

impl ProfileImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            key: Self::build_key(),
            bytes,
        }
    }

    pub fn build_key() -> String {
        format!("{}/{}", PROFILE_IMAGES_PREFIX, Uuid::new_v4())
    }

    pub fn content_type(&self) -> &'static str {
        PROFILE_IMAGE_CONTENT_TYPE
    }
}
