//! Content CRUD against the backend collections.
//!
//! Routes: `GET/POST /{collection}` and `PUT/DELETE /{collection}/{id}`
//! for projects, live-videos, mindmaps, and blog-posts, plus the
//! read-only `GET /comments`. Ids are assigned by the backend: create
//! strips any client-side id before sending and hands back whatever
//! entity the backend returns.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use folio_common::entities::{BlogPost, Comment, LiveVideo, Mindmap, Project};
use folio_common::error::Result;

use crate::envelope::{normalize_blog_post, normalize_blog_posts, normalize_entity, normalize_list};
use crate::http::ApiClient;

const PROJECTS: &str = "/projects";
const LIVE_VIDEOS: &str = "/live-videos";
const MINDMAPS: &str = "/mindmaps";
const BLOG_POSTS: &str = "/blog-posts";
const COMMENTS: &str = "/comments";

#[derive(Debug, Clone)]
pub struct ContentApi {
    http: ApiClient,
}

impl ContentApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self { http: ApiClient::new(base_url)? })
    }

    async fn list<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<Vec<T>> {
        let value = self.http.get(path, token).await?;
        normalize_list(value)
    }

    async fn create_raw(
        &self,
        path: &str,
        input: &impl Serialize,
        token: Option<&str>,
    ) -> Result<Value> {
        let body = strip_client_id(serde_json::to_value(input)?);
        self.http.post(path, &body, token).await
    }

    async fn create<T>(&self, path: &str, input: &T, token: Option<&str>) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let value = self.create_raw(path, input, token).await?;
        normalize_entity(value)
    }

    async fn update<T>(&self, path: &str, id: &str, input: &T, token: Option<&str>) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let value = self.http.put(&format!("{}/{}", path, id), input, token).await?;
        normalize_entity(value)
    }

    async fn delete(&self, path: &str, id: &str, token: Option<&str>) -> Result<()> {
        self.http.delete(&format!("{}/{}", path, id), token).await?;
        Ok(())
    }

    // ── Projects ───────────────────────────────────────────────────────

    #[instrument(skip(self, token))]
    pub async fn list_projects(&self, token: Option<&str>) -> Result<Vec<Project>> {
        let projects = self.list(PROJECTS, token).await?;
        debug!(count = projects.len(), "loaded projects");
        Ok(projects)
    }

    pub async fn create_project(&self, input: &Project, token: Option<&str>) -> Result<Project> {
        self.create(PROJECTS, input, token).await
    }

    pub async fn update_project(
        &self,
        id: &str,
        input: &Project,
        token: Option<&str>,
    ) -> Result<Project> {
        self.update(PROJECTS, id, input, token).await
    }

    pub async fn delete_project(&self, id: &str, token: Option<&str>) -> Result<()> {
        self.delete(PROJECTS, id, token).await
    }

    // ── Live videos ────────────────────────────────────────────────────

    #[instrument(skip(self, token))]
    pub async fn list_live_videos(&self, token: Option<&str>) -> Result<Vec<LiveVideo>> {
        self.list(LIVE_VIDEOS, token).await
    }

    pub async fn create_live_video(
        &self,
        input: &LiveVideo,
        token: Option<&str>,
    ) -> Result<LiveVideo> {
        self.create(LIVE_VIDEOS, input, token).await
    }

    pub async fn update_live_video(
        &self,
        id: &str,
        input: &LiveVideo,
        token: Option<&str>,
    ) -> Result<LiveVideo> {
        self.update(LIVE_VIDEOS, id, input, token).await
    }

    pub async fn delete_live_video(&self, id: &str, token: Option<&str>) -> Result<()> {
        self.delete(LIVE_VIDEOS, id, token).await
    }

    // ── Mindmaps ───────────────────────────────────────────────────────

    #[instrument(skip(self, token))]
    pub async fn list_mindmaps(&self, token: Option<&str>) -> Result<Vec<Mindmap>> {
        self.list(MINDMAPS, token).await
    }

    pub async fn create_mindmap(&self, input: &Mindmap, token: Option<&str>) -> Result<Mindmap> {
        self.create(MINDMAPS, input, token).await
    }

    pub async fn update_mindmap(
        &self,
        id: &str,
        input: &Mindmap,
        token: Option<&str>,
    ) -> Result<Mindmap> {
        self.update(MINDMAPS, id, input, token).await
    }

    pub async fn delete_mindmap(&self, id: &str, token: Option<&str>) -> Result<()> {
        self.delete(MINDMAPS, id, token).await
    }

    // ── Blog posts ─────────────────────────────────────────────────────
    // Blog rows pass through the legacy-key normalization on every read.

    #[instrument(skip(self, token))]
    pub async fn list_blog_posts(&self, token: Option<&str>) -> Result<Vec<BlogPost>> {
        let value = self.http.get(BLOG_POSTS, token).await?;
        normalize_blog_posts(value)
    }

    pub async fn create_blog_post(&self, input: &BlogPost, token: Option<&str>) -> Result<BlogPost> {
        let value = self.create_raw(BLOG_POSTS, input, token).await?;
        normalize_blog_post(value)
    }

    pub async fn update_blog_post(
        &self,
        id: &str,
        input: &BlogPost,
        token: Option<&str>,
    ) -> Result<BlogPost> {
        let value = self
            .http
            .put(&format!("{}/{}", BLOG_POSTS, id), input, token)
            .await?;
        normalize_blog_post(value)
    }

    pub async fn delete_blog_post(&self, id: &str, token: Option<&str>) -> Result<()> {
        self.delete(BLOG_POSTS, id, token).await
    }

    // ── Comments (read-only) ───────────────────────────────────────────

    #[instrument(skip(self, token))]
    pub async fn list_comments(&self, token: Option<&str>) -> Result<Vec<Comment>> {
        self.list(COMMENTS, token).await
    }
}

/// The backend owns id assignment; a draft's id never goes on the wire.
fn strip_client_id(mut value: Value) -> Value {
    if let Some(object) = value.as_object_mut() {
        object.remove("id");
    }
    value
}
