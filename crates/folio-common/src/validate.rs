//! Client-side pre-submit validation.
//!
//! These rules mirror what the backend is expected to enforce; they run
//! before any request is issued so a submit with violations never
//! reaches the network. Violations are collected as human-readable
//! strings and reported together.

use lazy_static::lazy_static;
use regex::Regex;

use crate::entities::{BlogPost, LiveVideo, Mindmap, PostStatus, Project};
use crate::error::{FolioError, Result};

lazy_static! {
    static ref DATE_RE: Regex = Regex::new(r"^\d{4}(-\d{2}-\d{2})?$").unwrap();
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    static ref NON_SLUG_RE: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// A date is a bare year or an exact `YYYY-MM-DD`.
pub fn is_valid_date(value: &str) -> bool {
    DATE_RE.is_match(value)
}

/// URL-valued fields must be absolute http(s) or root-relative.
pub fn is_valid_link(value: &str) -> bool {
    value.starts_with('/') || value.starts_with("http://") || value.starts_with("https://")
}

pub fn is_valid_slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}

/// Lowercase, collapse every non-alphanumeric run to a single hyphen,
/// trim leading/trailing hyphens.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let replaced = NON_SLUG_RE.replace_all(lowered.trim(), "-");
    replaced.trim_matches('-').to_string()
}

/// Slug auto-derived from title and date when the slug field is blank.
pub fn derive_slug(title: &str, date: &str) -> String {
    slugify(&format!("{}-{}", title, date))
}

fn collect(checks: Vec<Option<String>>) -> Vec<String> {
    checks.into_iter().flatten().collect()
}

fn check(failed: bool, message: &str) -> Option<String> {
    failed.then(|| message.to_string())
}

pub fn validate_project(project: &Project) -> Vec<String> {
    collect(vec![
        check(project.name.is_empty(), "Project name is required."),
        check(project.summary.is_empty(), "Project summary is required."),
        check(project.date.is_empty(), "Project date is required."),
        check(
            !project.date.is_empty() && !is_valid_date(&project.date),
            "Project date must be YYYY or YYYY-MM-DD.",
        ),
        check(
            project.cover.as_deref().is_some_and(|c| !c.is_empty() && !is_valid_link(c)),
            "Project cover must be a URL or /path.",
        ),
    ])
}

pub fn validate_live_video(video: &LiveVideo) -> Vec<String> {
    collect(vec![
        check(video.title.is_empty(), "Video title is required."),
        check(video.date.is_empty(), "Video date is required."),
        check(
            !video.date.is_empty() && !is_valid_date(&video.date),
            "Video date must be YYYY or YYYY-MM-DD.",
        ),
        check(
            video.file.is_empty(),
            "Video file is required. Please upload it first.",
        ),
        check(
            !video.file.is_empty() && !is_valid_link(&video.file),
            "Video file path is invalid.",
        ),
        check(
            video.cover.as_deref().is_some_and(|c| !c.is_empty() && !is_valid_link(c)),
            "Cover must be a URL or /path.",
        ),
    ])
}

pub fn validate_mindmap(mindmap: &Mindmap) -> Vec<String> {
    collect(vec![
        check(mindmap.title.is_empty(), "Mindmap title is required."),
        check(
            mindmap.file.is_empty(),
            "Mindmap file is required. Please upload it first.",
        ),
        check(
            !mindmap.file.is_empty() && !is_valid_link(&mindmap.file),
            "Mindmap file path is invalid.",
        ),
        check(mindmap.updated_at.is_empty(), "Updated At is required."),
        check(
            !mindmap.updated_at.is_empty() && !is_valid_date(&mindmap.updated_at),
            "Updated At must be YYYY or YYYY-MM-DD.",
        ),
    ])
}

/// Blog validation runs against the effective slug: the entered slug, or
/// the one derived from title+date when left blank. Published posts must
/// carry a cover.
pub fn validate_blog_post(post: &BlogPost) -> Vec<String> {
    let effective_slug = if post.slug.is_empty() {
        derive_slug(&post.title, &post.date)
    } else {
        post.slug.clone()
    };
    let requires_cover = post.status == PostStatus::Published;

    collect(vec![
        check(
            effective_slug.is_empty(),
            "Post slug is required and must use lowercase letters, numbers, or hyphens.",
        ),
        check(
            !effective_slug.is_empty() && !is_valid_slug(&effective_slug),
            "Post slug format is invalid. Use lowercase letters, numbers, and hyphens.",
        ),
        check(post.title.is_empty(), "Post title is required."),
        check(post.date.is_empty(), "Post date is required."),
        check(
            !post.date.is_empty() && !is_valid_date(&post.date),
            "Post date must be YYYY or YYYY-MM-DD.",
        ),
        check(
            requires_cover && post.cover_url.as_deref().map_or(true, str::is_empty),
            "Post cover is required when status is published.",
        ),
        check(
            post.cover_url.as_deref().is_some_and(|c| !c.is_empty() && !is_valid_link(c)),
            "Cover URL must be a URL or /path.",
        ),
        check(post.content.is_empty(), "Post content is required."),
    ])
}

/// Turn collected violations into a blocking error.
pub fn ensure_valid(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FolioError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_accepts_year_and_full_date_only() {
        assert!(is_valid_date("2024"));
        assert!(is_valid_date("2024-01-02"));
        assert!(!is_valid_date("2024-1-2"));
        assert!(!is_valid_date("2024-01"));
        assert!(!is_valid_date("01-02-2024"));
        assert!(!is_valid_date(" 2024"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn test_link_accepts_http_https_and_root_relative() {
        assert!(is_valid_link("/covers/a.jpg"));
        assert!(is_valid_link("http://example.com/a"));
        assert!(is_valid_link("https://example.com/a"));
        assert!(!is_valid_link("ftp://example.com/a"));
        assert!(!is_valid_link("covers/a.jpg"));
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("My First Post"), "my-first-post");
        assert_eq!(slugify("  --Hello, World!--  "), "hello-world");
    }

    #[test]
    fn test_derive_slug_from_title_and_date() {
        assert_eq!(
            derive_slug("My First Post", "2024-01-02"),
            "my-first-post-2024-01-02"
        );
    }

    #[test]
    fn test_project_missing_required_fields() {
        let errors = validate_project(&Project::default());
        assert!(errors.contains(&"Project name is required.".to_string()));
        assert!(errors.contains(&"Project summary is required.".to_string()));
        assert!(errors.contains(&"Project date is required.".to_string()));
    }

    #[test]
    fn test_project_bad_cover_and_date_reported_together() {
        let project = Project {
            name: "Folio".into(),
            summary: "Site".into(),
            date: "yesterday".into(),
            cover: Some("covers/a.jpg".into()),
            ..Project::default()
        };
        let errors = validate_project(&project);
        assert_eq!(
            errors,
            vec![
                "Project date must be YYYY or YYYY-MM-DD.".to_string(),
                "Project cover must be a URL or /path.".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_cover_treated_as_absent_across_entities() {
        let project = Project {
            name: "Folio".into(),
            summary: "Site".into(),
            date: "2024".into(),
            cover: Some("".into()),
            ..Project::default()
        };
        assert!(validate_project(&project).is_empty());

        let video = LiveVideo {
            title: "Show".into(),
            date: "2024".into(),
            file: "/live/01.mp4".into(),
            cover: Some("".into()),
            ..LiveVideo::default()
        };
        assert!(validate_live_video(&video).is_empty());
    }

    #[test]
    fn test_live_video_requires_uploaded_file() {
        let video = LiveVideo {
            title: "Show".into(),
            date: "2024".into(),
            ..LiveVideo::default()
        };
        let errors = validate_live_video(&video);
        assert_eq!(
            errors,
            vec!["Video file is required. Please upload it first.".to_string()]
        );
    }

    #[test]
    fn test_mindmap_valid_passes() {
        let mindmap = Mindmap {
            title: "Networks".into(),
            file: "/mindmaps/networks.pdf".into(),
            updated_at: "2024-03-01".into(),
            ..Mindmap::default()
        };
        assert!(validate_mindmap(&mindmap).is_empty());
    }

    #[test]
    fn test_published_post_requires_cover() {
        let post = BlogPost {
            title: "My First Post".into(),
            date: "2024-01-02".into(),
            status: PostStatus::Published,
            content: vec!["Hello.".into()],
            ..BlogPost::default()
        };
        let errors = validate_blog_post(&post);
        assert_eq!(
            errors,
            vec!["Post cover is required when status is published.".to_string()]
        );

        let draft = BlogPost { status: PostStatus::Draft, ..post };
        assert!(validate_blog_post(&draft).is_empty());
    }

    #[test]
    fn test_blog_slug_derived_when_blank() {
        let post = BlogPost {
            title: "My First Post".into(),
            date: "2024-01-02".into(),
            status: PostStatus::Draft,
            content: vec!["Hello.".into()],
            ..BlogPost::default()
        };
        // Blank slug passes because the derived slug is well-formed.
        assert!(validate_blog_post(&post).is_empty());

        let bad = BlogPost { slug: "Bad Slug!".into(), ..post };
        let errors = validate_blog_post(&bad);
        assert_eq!(
            errors,
            vec![
                "Post slug format is invalid. Use lowercase letters, numbers, and hyphens."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_ensure_valid_blocks_on_any_violation() {
        assert!(ensure_valid(vec![]).is_ok());
        let err = ensure_valid(vec!["Post title is required.".into()]).unwrap_err();
        assert!(matches!(err, FolioError::Validation(_)));
    }
}
