//! Domain DTOs for the posts API.
//!
//! # Design
//! These types mirror the service schema but are defined independently of
//! the mock-server crate. `PostContent` keeps every field optional because
//! the service, not the client, decides what a valid post is; tests rely on
//! sending incomplete payloads and observing the server's verdict.

use serde::{Deserialize, Serialize};

/// A post as stored by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

/// Payload for creating or fully replacing a post. Absent fields are left
/// out of the JSON entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl PostContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>, user_id: i64) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            user_id: Some(user_id),
        }
    }
}

impl From<&Post> for PostContent {
    fn from(post: &Post) -> Self {
        Self::new(post.title.clone(), post.body.clone(), post.user_id)
    }
}
