//! Built-in site content for the display commands.
//!
//! The public pages ship with seed data; when a display API URL is
//! configured and returns a non-empty list, the fetched list replaces
//! the seeds. Fetch failures are silently ignored and the seeds stay.

use serde::{Deserialize, Serialize};
use tracing::debug;

use folio_common::entities::{LiveVideo, Mindmap, Project, ProjectLink};

pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: "project-01".into(),
            name: "Graduation Project".into(),
            summary: "Brief summary of what this project does and why it matters.".into(),
            stack: vec!["Java".into(), "Spring".into(), "MySQL".into()],
            cover: Some("/projects/project-01.jpg".into()),
            highlights: Some(vec![
                "Designed core modules and REST APIs.".into(),
                "Implemented caching and messaging for performance.".into(),
            ]),
            date: "2024".into(),
            links: Some(vec![
                ProjectLink { label: "GitHub".into(), href: "https://github.com/yourname/project".into() },
                ProjectLink { label: "Docs".into(), href: "https://your-docs-link".into() },
            ]),
        },
        Project {
            id: "project-02".into(),
            name: "Mindmap Manager".into(),
            summary: "Manage and publish study mindmaps with search and tags.".into(),
            stack: vec!["React".into(), "Vite".into(), "TypeScript".into()],
            cover: Some("/projects/project-02.jpg".into()),
            highlights: Some(vec![
                "Fast search".into(),
                "Responsive UI".into(),
                "Export to PDF".into(),
            ]),
            date: "2023".into(),
            links: None,
        },
    ]
}

pub fn seed_live_videos() -> Vec<LiveVideo> {
    vec![
        LiveVideo {
            id: "live-01".into(),
            title: "Best View to Winter".into(),
            date: "2024-06-18".into(),
            description: Some("Add your show notes here.".into()),
            file: "/live/01.mp4".into(),
            cover: Some("/live/01.jpg".into()),
        },
        LiveVideo {
            id: "live-02".into(),
            title: "Live Show Snippet".into(),
            date: "2024-07-02".into(),
            description: Some("Replace with your real show details.".into()),
            file: "/live/02.mp4".into(),
            cover: Some("/live/02.jpg".into()),
        },
    ]
}

pub fn seed_mindmaps() -> Vec<Mindmap> {
    vec![
        Mindmap {
            id: "java-concurrency".into(),
            title: "Java Concurrency".into(),
            summary: Some("Thread model, JUC, locks, and common patterns.".into()),
            tags: Some(vec!["Java".into(), "JUC".into(), "Concurrency".into()]),
            file: "/mindmaps/java-concurrency.pdf".into(),
            updated_at: "2025-12-01".into(),
        },
        Mindmap {
            id: "mysql-index".into(),
            title: "MySQL Index & MVCC".into(),
            summary: Some("Indexing, isolation levels, and MVCC basics.".into()),
            tags: Some(vec!["MySQL".into(), "Database".into()]),
            file: "/mindmaps/mysql-index-mvcc.pdf".into(),
            updated_at: "2025-11-20".into(),
        },
        Mindmap {
            id: "spring-core".into(),
            title: "Spring Core".into(),
            summary: Some("IoC, AOP, transactions, and MVC essentials.".into()),
            tags: Some(vec!["Spring".into(), "Backend".into()]),
            file: "/mindmaps/spring-core.pdf".into(),
            updated_at: "2025-10-18".into(),
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRecord {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub year: Option<String>,
    pub cover: Option<String>,
}

pub fn seed_top_records() -> Vec<TopRecord> {
    // Placeholder entries; the years skip 2022.
    const YEARS: [&str; 10] = [
        "2023", "2021", "2020", "2019", "2018", "2017", "2016", "2015", "2014", "2013",
    ];
    YEARS
        .iter()
        .enumerate()
        .map(|(index, year)| TopRecord {
            id: format!("record-{:02}", index + 1),
            title: "Album Title".into(),
            artist: "Artist Name".into(),
            year: Some((*year).to_string()),
            cover: Some(format!("/live/record-{:02}.jpg", index + 1)),
        })
        .collect()
}

/// Fetch the live-page overlay. Any failure, non-list body, or empty
/// list keeps the seeds.
pub async fn fetch_live_overlay(url: &str) -> Option<Vec<LiveVideo>> {
    let response = reqwest::get(url).await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let videos: Vec<LiveVideo> = response.json().await.ok()?;
    if videos.is_empty() {
        debug!("live overlay returned no videos, keeping seeds");
        return None;
    }
    Some(videos)
}
