use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, SecondsFormat, Utc};
use log::warn;
use uuid::Uuid;

use crate::errors::ProfilesError;
use crate::models::user::User;

pub type Item = HashMap<String, AttributeValue>;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_user(&self, user: &User) -> Result<(), ProfilesError>;

    /// All users whose username equals `username` exactly. Usernames are not unique,
    /// so more than one user may match.
    async fn find_by_username(&self, username: &str) -> Result<Vec<User>, ProfilesError>;
}

/// DynamoDB table keyed by `id` with a global secondary index on `username`.
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table: String,
    username_index: String,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table: String, username_index: String) -> Self {
        Self {
            client,
            table,
            username_index,
        }
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put_user(&self, user: &User) -> Result<(), ProfilesError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(user_to_item(user)))
            .send()
            .await
            .map_err(|e| {
                ProfilesError::RecordStoreError(format!("Failed to put user item: {}", DisplayErrorContext(&e)))
            })?;

        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<User>, ProfilesError> {
        let mut users = vec![];
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table)
                .index_name(&self.username_index)
                .key_condition_expression("username = :username")
                .expression_attribute_values(":username", AttributeValue::S(username.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| {
                    ProfilesError::RecordStoreError(format!(
                        "Failed to query users by username: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;

            users.extend(users_from_items(output.items()));

            // a page ends at 1MB of data, keep going until the index is exhausted
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(users)
    }
}

pub fn user_to_item(user: &User) -> Item {
    HashMap::from([
        ("id".to_string(), AttributeValue::S(user.id.to_string())),
        ("username".to_string(), AttributeValue::S(user.username.clone())),
        ("firstName".to_string(), AttributeValue::S(user.first_name.clone())),
        ("lastName".to_string(), AttributeValue::S(user.last_name.clone())),
        (
            "profilePictureUrl".to_string(),
            AttributeValue::S(user.profile_picture_url.clone()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::S(user.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        ),
    ])
}

/// Decodes a page of query results. Items that cannot be decoded are logged and
/// left out so one bad record does not hide the others.
pub fn users_from_items(items: &[Item]) -> Vec<User> {
    items
        .iter()
        .filter_map(|item| match user_from_item(item) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Skipping undecodable user item: {}", e);
                None
            }
        })
        .collect()
}

pub fn user_from_item(item: &Item) -> Result<User, ProfilesError> {
    let id = string_attr(item, "id")?;
    let created_at = string_attr(item, "createdAt")?;

    Ok(User {
        id: Uuid::parse_str(&id)
            .map_err(|e| ProfilesError::RecordStoreError(format!("Malformed id attribute {}: {}", id, e)))?,
        username: string_attr(item, "username")?,
        first_name: string_attr(item, "firstName")?,
        last_name: string_attr(item, "lastName")?,
        // items written by the earlier deployment keep the url under `profilePicture`
        profile_picture_url: string_attr(item, "profilePictureUrl").or_else(|_| string_attr(item, "profilePicture"))?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| ProfilesError::RecordStoreError(format!("Malformed createdAt attribute {}: {}", created_at, e)))?
            .with_timezone(&Utc),
    })
}

fn string_attr(item: &Item, name: &str) -> Result<String, ProfilesError> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| ProfilesError::RecordStoreError(format!("User item is missing string attribute {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::NewUser;

    fn user() -> User {
        User::new(
            NewUser {
                username: "alice".to_string(),
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                profile_picture: vec![],
            },
            "https://bucket.s3.us-east-1.amazonaws.com/profile-images/1".to_string(),
        )
    }

    #[test]
    fn item_keeps_every_attribute() {
        let user = user();
        let item = user_to_item(&user);

        assert_eq!(item.len(), 6);
        assert_eq!(item["username"], AttributeValue::S("alice".to_string()));
        assert_eq!(user_from_item(&item).expect("decodable item"), user);
    }

    #[test]
    fn created_at_is_iso_8601_without_precision_loss() {
        let user = user();
        let item = user_to_item(&user);
        let created_at = item["createdAt"].as_s().expect("string attribute");

        assert!(created_at.ends_with('Z'));
        assert_eq!(
            DateTime::parse_from_rfc3339(created_at).unwrap().with_timezone(&Utc),
            user.created_at
        );
    }

    #[test]
    fn reads_picture_url_from_legacy_attribute() {
        let user = user();
        let mut item = user_to_item(&user);
        let url = item.remove("profilePictureUrl").expect("url attribute");
        item.insert("profilePicture".to_string(), url);
        item.insert(
            "createdAt".to_string(),
            AttributeValue::S("2024-05-01T10:20:30.123Z".to_string()),
        );

        let decoded = user_from_item(&item).expect("legacy item decodes");

        assert_eq!(decoded.profile_picture_url, user.profile_picture_url);
        assert_eq!(decoded.username, "alice");
    }

    #[test]
    fn undecodable_items_are_skipped() {
        let good = user_to_item(&user());
        let mut broken = user_to_item(&user());
        broken.remove("firstName");

        let users = users_from_items(&[broken, good.clone()]);

        assert_eq!(users.len(), 1);
        assert_eq!(users[0], user_from_item(&good).unwrap());
    }

    #[test]
    fn partial_item_is_rejected() {
        let mut item = user_to_item(&user());
        item.remove("lastName");

        let err = user_from_item(&item).unwrap_err();

        assert!(err.to_string().contains("lastName"));
    }
}
