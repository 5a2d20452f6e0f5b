//! Resource wrapper for the `/posts` collection.
//!
//! # Design
//! `PostsApi` turns domain intents into single `ApiClient` calls and returns
//! the raw `HttpResponse`, leaving status interpretation to the caller. The
//! only decisions made here are which endpoint to hit, what default payload
//! to send, and whether `create_post_if_not_exists` needs to create at all.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{ApiClient, HttpResponse};
use crate::types::{Post, PostContent};

const POSTS: &str = "/posts";

#[derive(Debug, Clone)]
pub struct PostsApi {
    http: ApiClient,
}

impl PostsApi {
    /// Client for the public service at `DEFAULT_BASE_URL`.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            http: ApiClient::new(config),
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::with_config(ClientConfig::from_env()?))
    }

    pub fn http(&self) -> &ApiClient {
        &self.http
    }

    /// Payload used when the caller supplies none. The body embeds the
    /// current Unix time so consecutive posts differ.
    pub fn default_post_content() -> PostContent {
        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        PostContent::new("Anaconda", format!("Welcome to Anaconda (created {created})"), 1)
    }

    pub fn create_post(&self, content: Option<&PostContent>) -> Result<HttpResponse, ApiError> {
        match content {
            Some(content) => self.http.post(POSTS, Some(content)),
            None => self.http.post(POSTS, Some(&Self::default_post_content())),
        }
    }

    /// Create a post only when the collection is empty. Returns `None`
    /// without sending anything else when posts already exist.
    pub fn create_post_if_not_exists(
        &self,
        content: Option<&PostContent>,
    ) -> Result<Option<HttpResponse>, ApiError> {
        let posts: Vec<serde_json::Value> = self.get_posts()?.json()?;
        if !posts.is_empty() {
            debug!(count = posts.len(), "posts already exist, skipping create");
            return Ok(None);
        }
        self.create_post(content).map(Some)
    }

    pub fn get_posts(&self) -> Result<HttpResponse, ApiError> {
        self.http.get(POSTS, None)
    }

    pub fn get_posts_by_user(&self, user_id: i64) -> Result<HttpResponse, ApiError> {
        let user_id = user_id.to_string();
        let params = [("userId", user_id.as_str())];
        self.http.get(POSTS, Some(&params[..]))
    }

    pub fn get_post(&self, id: u64) -> Result<HttpResponse, ApiError> {
        self.http.get(&format!("{POSTS}/{id}"), None)
    }

    /// Ensure at least one post exists, then return the first one listed.
    pub fn get_any_post(&self) -> Result<Post, ApiError> {
        self.create_post_if_not_exists(None)?;
        let posts: Vec<Post> = self.get_posts()?.json()?;
        posts.into_iter().next().ok_or(ApiError::NoPosts)
    }

    pub fn update_post(&self, id: u64, content: &PostContent) -> Result<HttpResponse, ApiError> {
        self.http.put(&format!("{POSTS}/{id}"), Some(content))
    }

    pub fn delete_post(&self, id: u64) -> Result<HttpResponse, ApiError> {
        self.http.delete(&format!("{POSTS}/{id}"))
    }
}

impl Default for PostsApi {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn default_post_content_shape() {
        let content = PostsApi::default_post_content();
        assert_eq!(content.title.as_deref(), Some("Anaconda"));
        assert_eq!(content.user_id, Some(1));
        let body = content.body.unwrap();
        assert!(body.starts_with("Welcome to Anaconda (created "));
        assert!(body.ends_with(')'));
    }

    #[test]
    fn default_post_content_body_carries_timestamp() {
        let body = PostsApi::default_post_content().body.unwrap();
        let stamp = body
            .trim_start_matches("Welcome to Anaconda (created ")
            .trim_end_matches(')');
        let secs: f64 = stamp.parse().unwrap();
        assert!(secs > 0.0);
    }

    #[test]
    fn new_targets_public_service() {
        let api = PostsApi::new();
        assert_eq!(api.http().base_url(), DEFAULT_BASE_URL);
    }
}
