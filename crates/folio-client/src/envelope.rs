//! Response-shape normalization.
//!
//! The backend answers either with a bare entity/array or with an
//! `{ok: true, data: ...}` envelope. Instead of probing fields ad hoc,
//! the two accepted shapes form an explicit sum type with a documented
//! priority order: the envelope arm is tried first, the bare value
//! second.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use folio_common::entities::BlogPost;
use folio_common::error::Result;

/// The two response shapes the backend is allowed to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Envelope { ok: bool, data: T },
    Bare(T),
}

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        match self {
            Payload::Envelope { data, .. } => data,
            Payload::Bare(value) => value,
        }
    }
}

/// Decode a list response in either shape.
pub fn normalize_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    let payload: Payload<Vec<T>> = serde_json::from_value(value)?;
    Ok(payload.into_inner())
}

/// Decode a single-entity response in either shape.
pub fn normalize_entity<T: DeserializeOwned>(value: Value) -> Result<T> {
    let payload: Payload<T> = serde_json::from_value(value)?;
    Ok(payload.into_inner())
}

/// Blog posts need one extra step: older backend rows expose the cover
/// under `cover` instead of `coverUrl`. Accept the legacy key, then let
/// the entity defaults fill status/slug/date.
pub fn normalize_blog_post(value: Value) -> Result<BlogPost> {
    let mut value: Value = normalize_entity(value)?;
    if let Some(object) = value.as_object_mut() {
        if !object.contains_key("coverUrl") {
            if let Some(cover) = object.remove("cover") {
                object.insert("coverUrl".to_string(), cover);
            }
        }
    }
    Ok(serde_json::from_value(value)?)
}

pub fn normalize_blog_posts(value: Value) -> Result<Vec<BlogPost>> {
    let rows: Vec<Value> = normalize_list(value)?;
    rows.into_iter().map(normalize_blog_post).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::entities::{PostStatus, Project};
    use serde_json::json;

    #[test]
    fn test_bare_array_accepted() {
        let value = json!([
            { "id": "p1", "name": "A", "summary": "s", "stack": [], "date": "2024" }
        ]);
        let projects: Vec<Project> = normalize_list(value).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, "p1");
    }

    #[test]
    fn test_envelope_array_accepted() {
        let value = json!({
            "ok": true,
            "data": [
                { "id": "p1", "name": "A", "summary": "s", "stack": [], "date": "2024" }
            ]
        });
        let projects: Vec<Project> = normalize_list(value).unwrap();
        assert_eq!(projects[0].name, "A");
    }

    #[test]
    fn test_envelope_entity_accepted() {
        let value = json!({
            "ok": true,
            "data": { "id": "p2", "name": "B", "summary": "s", "stack": [], "date": "2023" }
        });
        let project: Project = normalize_entity(value).unwrap();
        assert_eq!(project.id, "p2");
    }

    #[test]
    fn test_blog_post_legacy_cover_key() {
        let value = json!({
            "id": "b1",
            "slug": "hello",
            "title": "Hello",
            "date": "2024-06-18",
            "cover": "/blog/hello.jpg",
            "content": ["hi"]
        });
        let post = normalize_blog_post(value).unwrap();
        assert_eq!(post.cover_url.as_deref(), Some("/blog/hello.jpg"));
        assert_eq!(post.status, PostStatus::Published);
    }

    #[test]
    fn test_blog_post_cover_url_wins_over_legacy() {
        let value = json!({
            "id": "b1",
            "slug": "hello",
            "title": "Hello",
            "date": "2024",
            "coverUrl": "/new.jpg",
            "cover": "/old.jpg",
            "content": []
        });
        let post = normalize_blog_post(value).unwrap();
        assert_eq!(post.cover_url.as_deref(), Some("/new.jpg"));
    }

    #[test]
    fn test_blog_posts_envelope_list() {
        let value = json!({
            "ok": true,
            "data": [
                { "id": "b1", "title": "Hello", "content": [] },
                { "id": "b2", "title": "World", "cover": "/w.jpg", "content": [] }
            ]
        });
        let posts = normalize_blog_posts(value).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].cover_url.as_deref(), Some("/w.jpg"));
        assert!(posts[0].slug.is_empty());
    }
}
