/// Content entity types mirroring the backend REST payloads.
/// Ids are opaque strings assigned by the backend, never client-side.

use serde::{Deserialize, Serialize};

/// Anything with a backend-assigned id. Lets list state mutate
/// generically across the four content types.
pub trait Entity {
    fn id(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub summary: String,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    /// Bare year or YYYY-MM-DD.
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<ProjectLink>>,
}

impl Entity for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Live video
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LiveVideo {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute URL or root-relative /path of the video file.
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl Entity for LiveVideo {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Mindmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Mindmap {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub file: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl Entity for Mindmap {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Blog post
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Published,
    Draft,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Draft => "draft",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(PostStatus::Published),
            "draft" => Ok(PostStatus::Draft),
            other => Err(format!("unknown post status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BlogPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "coverUrl", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    /// One paragraph per element.
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Entity for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Comments (read-only in the admin console)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    #[serde(rename = "postId")]
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Comment shape returned by the public comments endpoint. Ids there may
/// be numeric or string, so they are accepted as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicComment {
    pub id: serde_json::Value,
    pub name: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub user: AdminUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "expiresAt", skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_post_wire_names() {
        let post = BlogPost {
            id: "p1".into(),
            slug: "hello".into(),
            title: "Hello".into(),
            date: "2024-06-18".into(),
            cover_url: Some("/blog/hello.jpg".into()),
            excerpt: None,
            status: PostStatus::Draft,
            content: vec!["First paragraph.".into()],
            tags: None,
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["coverUrl"], "/blog/hello.jpg");
        assert_eq!(value["status"], "draft");
        assert!(value.get("excerpt").is_none());
    }

    #[test]
    fn test_post_status_defaults_to_published() {
        let post: BlogPost = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "slug": "hello",
            "title": "Hello",
            "date": "2024",
            "content": []
        }))
        .unwrap();
        assert_eq!(post.status, PostStatus::Published);
    }

    #[test]
    fn test_mindmap_updated_at_rename() {
        let mindmap: Mindmap = serde_json::from_value(serde_json::json!({
            "id": "m1",
            "title": "Networks",
            "file": "/mindmaps/networks.pdf",
            "updatedAt": "2024-03-01"
        }))
        .unwrap();
        assert_eq!(mindmap.updated_at, "2024-03-01");
        assert_eq!(mindmap.id(), "m1");
    }
}
