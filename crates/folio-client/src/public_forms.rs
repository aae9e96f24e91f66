//! Public blog-page endpoints: comments and the subscribe form.
//!
//! Both are plain fire-and-forget POSTs against their own configured
//! URLs, outside the admin base. No retry policy; callers turn the
//! Result into simple success/error state.

use reqwest::ClientBuilder;
use serde_json::json;
use std::time::Duration;
use tracing::instrument;

use folio_common::entities::PublicComment;
use folio_common::error::{ApiFailure, FolioError, Result};

use crate::envelope::normalize_list;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn build_client() -> Result<reqwest::Client> {
    ClientBuilder::new()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| FolioError::Config(format!("Failed to build HTTP client: {}", e)))
}

fn status_failure(status: reqwest::StatusCode) -> FolioError {
    FolioError::Api(ApiFailure {
        error: "RequestError".to_string(),
        message: Some("Request failed.".to_string()),
        status: Some(status.as_u16()),
        request_id: None,
    })
}

#[derive(Debug, Clone)]
pub struct CommentsClient {
    endpoint: String,
    client: reqwest::Client,
}

impl CommentsClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self { endpoint: endpoint.into(), client: build_client()? })
    }

    /// Comments for one post, `GET ?postId=`.
    #[instrument(skip(self))]
    pub async fn list(&self, post_id: i64) -> Result<Vec<PublicComment>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("postId", post_id.to_string())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_failure(status));
        }
        normalize_list(response.json().await?)
    }

    #[instrument(skip(self, email, message))]
    pub async fn post(&self, post_id: i64, name: &str, email: &str, message: &str) -> Result<()> {
        let body = json!({
            "postId": post_id,
            "name": name,
            "email": email,
            "message": message,
        });
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_failure(status));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SubscribeClient {
    endpoint: String,
    client: reqwest::Client,
}

impl SubscribeClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self { endpoint: endpoint.into(), client: build_client()? })
    }

    #[instrument(skip(self, email))]
    pub async fn subscribe(&self, email: &str) -> Result<()> {
        let body = json!({ "email": email, "source": "blog" });
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_failure(status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_public_comments_accept_numeric_and_string_ids() {
        let value = json!({
            "ok": true,
            "data": [
                { "id": 7, "name": "A", "message": "hi", "createdAt": "2024-06-18" },
                { "id": "c-8", "name": "B", "message": "yo", "createdAt": "2024-06-19" }
            ]
        });
        let comments: Vec<PublicComment> = normalize_list(value).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].id, json!(7));
        assert_eq!(comments[1].id, json!("c-8"));
    }
}
