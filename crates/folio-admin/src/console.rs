//! Admin console controllers: one load/validate/submit path per content
//! type, all sharing the session token and the per-section rosters.
//!
//! Validation always runs before anything touches the network; a draft
//! with violations is rejected locally and no request is issued. List
//! mutations happen only after the backend call resolved.

use tracing::{info, instrument};

use folio_client::auth::{AuthApi, Session};
use folio_client::content::ContentApi;
use folio_client::roster::Roster;
use folio_client::token::TokenSlot;
use folio_client::upload::{UploadClient, UploadTarget};
use folio_common::entities::{BlogPost, Comment, LiveVideo, Mindmap, PostStatus, Project};
use folio_common::error::{FolioError, Result};
use folio_common::fields::{parse_lines, parse_link_lines};
use folio_common::validate::{
    derive_slug, ensure_valid, validate_blog_post, validate_live_video, validate_mindmap,
    validate_project,
};

const API_NOT_CONFIGURED: &str =
    "Admin API not configured. Set FOLIO_API_URL to enable content management.";
const UPLOAD_NOT_CONFIGURED: &str =
    "Upload API not configured. Set FOLIO_UPLOAD_API_URL to enable upload.";

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Drafts: form state with raw text for the list-valued fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub summary: String,
    /// One stack entry per line.
    pub stack_input: String,
    /// One highlight per line.
    pub highlights_input: String,
    pub cover: Option<String>,
    pub date: String,
    /// One link per line: `Label|URL` or a bare URL.
    pub links_input: String,
}

impl ProjectDraft {
    fn build(&self, id: &str) -> Project {
        let highlights = parse_lines(&self.highlights_input);
        let links = parse_link_lines(&self.links_input);
        Project {
            id: id.to_string(),
            name: self.name.clone(),
            summary: self.summary.clone(),
            stack: parse_lines(&self.stack_input),
            cover: self.cover.clone().filter(|c| !c.is_empty()),
            highlights: (!highlights.is_empty()).then_some(highlights),
            date: self.date.clone(),
            links: (!links.is_empty()).then_some(links),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LiveVideoDraft {
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    /// Filled by a successful upload or a pasted URL.
    pub file: Option<String>,
    pub cover: Option<String>,
}

impl LiveVideoDraft {
    fn build(&self, id: &str) -> LiveVideo {
        LiveVideo {
            id: id.to_string(),
            title: self.title.clone(),
            date: self.date.clone(),
            description: self.description.clone().filter(|d| !d.is_empty()),
            file: self.file.clone().unwrap_or_default(),
            cover: self.cover.clone().filter(|c| !c.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MindmapDraft {
    pub title: String,
    pub summary: Option<String>,
    /// Tags, one per line or comma-separated.
    pub tags_input: String,
    pub file: Option<String>,
    pub updated_at: String,
}

impl MindmapDraft {
    fn build(&self, id: &str) -> Mindmap {
        let tags: Vec<String> = self
            .tags_input
            .split(['\n', ','])
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();
        Mindmap {
            id: id.to_string(),
            title: self.title.clone(),
            summary: self.summary.clone().filter(|s| !s.is_empty()),
            tags: (!tags.is_empty()).then_some(tags),
            file: self.file.clone().unwrap_or_default(),
            updated_at: self.updated_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogPostDraft {
    /// Left blank to derive from title and date.
    pub slug: String,
    pub title: String,
    pub date: String,
    pub cover_url: Option<String>,
    pub excerpt: Option<String>,
    pub status: PostStatus,
    /// One paragraph per line.
    pub content_input: String,
    /// One tag per line.
    pub tags_input: String,
}

impl BlogPostDraft {
    fn build(&self, id: &str) -> BlogPost {
        let slug = if self.slug.is_empty() {
            derive_slug(&self.title, &self.date)
        } else {
            self.slug.clone()
        };
        let tags = parse_lines(&self.tags_input);
        BlogPost {
            id: id.to_string(),
            slug,
            title: self.title.clone(),
            date: self.date.clone(),
            cover_url: self.cover_url.clone().filter(|c| !c.is_empty()),
            excerpt: self.excerpt.clone().filter(|e| !e.is_empty()),
            status: self.status,
            content: parse_lines(&self.content_input),
            tags: (!tags.is_empty()).then_some(tags),
        }
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

pub struct Console {
    session: Session<AuthApi>,
    content: Option<ContentApi>,
    upload: Option<UploadClient>,
    pub projects: Roster<Project>,
    pub live_videos: Roster<LiveVideo>,
    pub mindmaps: Roster<Mindmap>,
    pub blog_posts: Roster<BlogPost>,
}

impl Console {
    pub fn new(
        api_url: Option<&str>,
        upload_url: Option<&str>,
        slot: TokenSlot,
    ) -> Result<Self> {
        let auth = api_url.map(AuthApi::new).transpose()?;
        let content = api_url.map(ContentApi::new).transpose()?;
        let upload = upload_url.map(UploadClient::new).transpose()?;
        Ok(Self {
            session: Session::new(auth, slot),
            content,
            upload,
            projects: Roster::default(),
            live_videos: Roster::default(),
            mindmaps: Roster::default(),
            blog_posts: Roster::default(),
        })
    }

    pub fn session(&self) -> &Session<AuthApi> {
        &self.session
    }

    pub async fn initialize(&mut self) {
        self.session.initialize().await;
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.session.login(email, password).await
    }

    pub async fn logout(&mut self) {
        self.session.logout().await;
    }

    fn require_content(&self) -> Result<&ContentApi> {
        self.content
            .as_ref()
            .ok_or_else(|| FolioError::Config(API_NOT_CONFIGURED.to_string()))
    }

    fn require_upload(&self) -> Result<&UploadClient> {
        self.upload
            .as_ref()
            .ok_or_else(|| FolioError::Config(UPLOAD_NOT_CONFIGURED.to_string()))
    }

    fn token(&self) -> Option<String> {
        self.session.token().map(String::from)
    }

    /// Fetch all four lists concurrently; each section records its own
    /// outcome so one failure does not hide the others.
    #[instrument(skip(self))]
    pub async fn load_all(&mut self) -> Result<()> {
        let api = self.require_content()?.clone();
        let token = self.token();
        let token = token.as_deref();

        self.projects.begin_loading();
        self.live_videos.begin_loading();
        self.mindmaps.begin_loading();
        self.blog_posts.begin_loading();

        let (projects, live_videos, mindmaps, blog_posts) = tokio::join!(
            api.list_projects(token),
            api.list_live_videos(token),
            api.list_mindmaps(token),
            api.list_blog_posts(token),
        );

        match projects {
            Ok(items) => self.projects.set_loaded(items),
            Err(e) => self.projects.set_failed(e.user_message("Failed to load projects.")),
        }
        match live_videos {
            Ok(items) => self.live_videos.set_loaded(items),
            Err(e) => self
                .live_videos
                .set_failed(e.user_message("Failed to load live videos.")),
        }
        match mindmaps {
            Ok(items) => self.mindmaps.set_loaded(items),
            Err(e) => self.mindmaps.set_failed(e.user_message("Failed to load mindmaps.")),
        }
        match blog_posts {
            Ok(items) => self.blog_posts.set_loaded(items),
            Err(e) => self
                .blog_posts
                .set_failed(e.user_message("Failed to load blog posts.")),
        }
        Ok(())
    }

    // ── Projects ───────────────────────────────────────────────────────

    pub async fn list_projects(&mut self) -> Result<&[Project]> {
        let api = self.require_content()?.clone();
        self.projects.begin_loading();
        match api.list_projects(self.token().as_deref()).await {
            Ok(items) => self.projects.set_loaded(items),
            Err(e) => {
                self.projects.set_failed(e.user_message("Failed to load projects."));
                return Err(e);
            }
        }
        Ok(self.projects.items())
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_project(&mut self, draft: &ProjectDraft) -> Result<Project> {
        let payload = draft.build("");
        ensure_valid(validate_project(&payload))?;
        let api = self.require_content()?;
        let created = api.create_project(&payload, self.token().as_deref()).await?;
        info!(id = %created.id, "project created");
        self.projects.insert_created(created.clone());
        Ok(created)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_project(&mut self, id: &str, draft: &ProjectDraft) -> Result<Project> {
        let payload = draft.build(id);
        ensure_valid(validate_project(&payload))?;
        let api = self.require_content()?;
        let updated = api
            .update_project(id, &payload, self.token().as_deref())
            .await?;
        self.projects.apply_update(updated.clone());
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_project(&mut self, id: &str) -> Result<()> {
        let api = self.require_content()?;
        api.delete_project(id, self.token().as_deref()).await?;
        self.projects.remove(id);
        Ok(())
    }

    // ── Live videos ────────────────────────────────────────────────────

    pub async fn list_live_videos(&mut self) -> Result<&[LiveVideo]> {
        let api = self.require_content()?.clone();
        self.live_videos.begin_loading();
        match api.list_live_videos(self.token().as_deref()).await {
            Ok(items) => self.live_videos.set_loaded(items),
            Err(e) => {
                self.live_videos
                    .set_failed(e.user_message("Failed to load live videos."));
                return Err(e);
            }
        }
        Ok(self.live_videos.items())
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_live_video(&mut self, draft: &LiveVideoDraft) -> Result<LiveVideo> {
        let payload = draft.build("");
        ensure_valid(validate_live_video(&payload))?;
        let api = self.require_content()?;
        let created = api
            .create_live_video(&payload, self.token().as_deref())
            .await?;
        info!(id = %created.id, "live video created");
        self.live_videos.insert_created(created.clone());
        Ok(created)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_live_video(&mut self, id: &str, draft: &LiveVideoDraft) -> Result<LiveVideo> {
        let payload = draft.build(id);
        ensure_valid(validate_live_video(&payload))?;
        let api = self.require_content()?;
        let updated = api
            .update_live_video(id, &payload, self.token().as_deref())
            .await?;
        self.live_videos.apply_update(updated.clone());
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_live_video(&mut self, id: &str) -> Result<()> {
        let api = self.require_content()?;
        api.delete_live_video(id, self.token().as_deref()).await?;
        self.live_videos.remove(id);
        Ok(())
    }

    // ── Mindmaps ───────────────────────────────────────────────────────

    pub async fn list_mindmaps(&mut self) -> Result<&[Mindmap]> {
        let api = self.require_content()?.clone();
        self.mindmaps.begin_loading();
        match api.list_mindmaps(self.token().as_deref()).await {
            Ok(items) => self.mindmaps.set_loaded(items),
            Err(e) => {
                self.mindmaps.set_failed(e.user_message("Failed to load mindmaps."));
                return Err(e);
            }
        }
        Ok(self.mindmaps.items())
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_mindmap(&mut self, draft: &MindmapDraft) -> Result<Mindmap> {
        let payload = draft.build("");
        ensure_valid(validate_mindmap(&payload))?;
        let api = self.require_content()?;
        let created = api.create_mindmap(&payload, self.token().as_deref()).await?;
        info!(id = %created.id, "mindmap created");
        self.mindmaps.insert_created(created.clone());
        Ok(created)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_mindmap(&mut self, id: &str, draft: &MindmapDraft) -> Result<Mindmap> {
        let payload = draft.build(id);
        ensure_valid(validate_mindmap(&payload))?;
        let api = self.require_content()?;
        let updated = api
            .update_mindmap(id, &payload, self.token().as_deref())
            .await?;
        self.mindmaps.apply_update(updated.clone());
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_mindmap(&mut self, id: &str) -> Result<()> {
        let api = self.require_content()?;
        api.delete_mindmap(id, self.token().as_deref()).await?;
        self.mindmaps.remove(id);
        Ok(())
    }

    // ── Blog posts ─────────────────────────────────────────────────────

    pub async fn list_blog_posts(&mut self) -> Result<&[BlogPost]> {
        let api = self.require_content()?.clone();
        self.blog_posts.begin_loading();
        match api.list_blog_posts(self.token().as_deref()).await {
            Ok(items) => self.blog_posts.set_loaded(items),
            Err(e) => {
                self.blog_posts
                    .set_failed(e.user_message("Failed to load blog posts."));
                return Err(e);
            }
        }
        Ok(self.blog_posts.items())
    }

    #[instrument(skip(self, draft), fields(slug = %draft.slug, status = draft.status.as_str()))]
    pub async fn create_blog_post(&mut self, draft: &BlogPostDraft) -> Result<BlogPost> {
        let payload = draft.build("");
        ensure_valid(validate_blog_post(&payload))?;
        let api = self.require_content()?;
        let created = api
            .create_blog_post(&payload, self.token().as_deref())
            .await?;
        info!(id = %created.id, slug = %created.slug, "blog post created");
        self.blog_posts.insert_created(created.clone());
        Ok(created)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_blog_post(&mut self, id: &str, draft: &BlogPostDraft) -> Result<BlogPost> {
        let payload = draft.build(id);
        ensure_valid(validate_blog_post(&payload))?;
        let api = self.require_content()?;
        let updated = api
            .update_blog_post(id, &payload, self.token().as_deref())
            .await?;
        self.blog_posts.apply_update(updated.clone());
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_blog_post(&mut self, id: &str) -> Result<()> {
        let api = self.require_content()?;
        api.delete_blog_post(id, self.token().as_deref()).await?;
        self.blog_posts.remove(id);
        Ok(())
    }

    // ── Comments / upload ──────────────────────────────────────────────

    pub async fn list_comments(&self) -> Result<Vec<Comment>> {
        let api = self.require_content()?;
        api.list_comments(self.token().as_deref()).await
    }

    /// Upload a local file and return the stored URL, ready to be
    /// written into the relevant draft field.
    pub async fn upload(&self, target: UploadTarget, path: &std::path::Path) -> Result<String> {
        let client = self.require_upload()?;
        client.upload_path(target, path, self.token().as_deref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured_console() -> Console {
        Console::new(None, None, TokenSlot::disabled()).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_before_any_request() {
        let mut console = unconfigured_console();
        // No backend is configured, so reaching the network would fail
        // with a Config error; validation must fire first.
        let err = console.create_project(&ProjectDraft::default()).await.unwrap_err();
        match err {
            FolioError::Validation(errors) => {
                assert!(errors.contains(&"Project name is required.".to_string()));
                assert!(errors.contains(&"Project summary is required.".to_string()));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(console.projects.items().is_empty());
    }

    #[tokio::test]
    async fn test_valid_draft_without_backend_reports_unconfigured() {
        let mut console = unconfigured_console();
        let draft = ProjectDraft {
            name: "Folio".into(),
            summary: "Site".into(),
            date: "2024".into(),
            ..ProjectDraft::default()
        };
        let err = console.create_project(&draft).await.unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
        assert_eq!(
            err.user_message(""),
            "Admin API not configured. Set FOLIO_API_URL to enable content management."
        );
    }

    #[test]
    fn test_project_draft_parses_text_fields() {
        let draft = ProjectDraft {
            name: "Folio".into(),
            summary: "Site".into(),
            stack_input: "Rust\n Tokio \n".into(),
            highlights_input: "".into(),
            cover: Some("".into()),
            date: "2024".into(),
            links_input: "GitHub|https://x.com\n/a.png".into(),
        };
        let project = draft.build("");
        assert_eq!(project.stack, vec!["Rust", "Tokio"]);
        assert!(project.highlights.is_none());
        assert!(project.cover.is_none());
        let links = project.links.unwrap();
        assert_eq!(links[0].label, "GitHub");
        assert_eq!(links[1].label, "Link 2");
        assert_eq!(links[1].href, "/a.png");
    }

    #[test]
    fn test_blog_draft_derives_slug_when_blank() {
        let draft = BlogPostDraft {
            title: "My First Post".into(),
            date: "2024-01-02".into(),
            status: PostStatus::Draft,
            content_input: "Hello.".into(),
            ..BlogPostDraft::default()
        };
        let post = draft.build("");
        assert_eq!(post.slug, "my-first-post-2024-01-02");
        assert_eq!(post.content, vec!["Hello."]);
    }

    #[test]
    fn test_mindmap_draft_accepts_commas_and_newlines() {
        let draft = MindmapDraft {
            title: "Networks".into(),
            tags_input: "TCP, HTTP\nDNS".into(),
            file: Some("/mindmaps/networks.pdf".into()),
            updated_at: "2024".into(),
            ..MindmapDraft::default()
        };
        let mindmap = draft.build("");
        assert_eq!(mindmap.tags.unwrap(), vec!["TCP", "HTTP", "DNS"]);
    }

    #[test]
    fn test_live_draft_empty_cover_dropped() {
        let draft = LiveVideoDraft {
            title: "Show".into(),
            date: "2024".into(),
            file: Some("/live/01.mp4".into()),
            cover: Some("".into()),
            ..LiveVideoDraft::default()
        };
        let video = draft.build("live-01");
        assert!(video.cover.is_none());
        assert_eq!(video.id, "live-01");
    }

    #[test]
    fn test_today_is_a_valid_form_date() {
        assert!(folio_common::validate::is_valid_date(&today()));
    }
}
