mod create;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::NewUser;

/// Record persisted in the record store, primary key `id`. `username` is indexed but
/// not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_picture_url: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(new_user: NewUser, profile_picture_url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            profile_picture_url,
            created_at: Utc::now(),
        }
    }
}
