//! Command-line surface of the admin console.
//!
//! List-valued form fields take repeated flags (`--stack Rust --stack
//! Tokio`); links use the `Label|URL` shorthand. Cover and file fields
//! accept either a pasted URL or a local path to upload first.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use folio_client::upload::UploadTarget;
use folio_common::entities::PostStatus;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Admin console for the folio portfolio and blog site")]
pub struct Cli {
    /// Path to folio.toml (defaults to ./folio.toml or $FOLIO_CONFIG).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session token.
    Login {
        email: String,
        /// Falls back to FOLIO_ADMIN_PASSWORD when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the session locally and best-effort on the server.
    Logout,
    /// Show the signed-in admin user.
    Whoami,
    /// Fetch all four content lists and report each section's state.
    Load,

    /// Manage portfolio projects.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Manage live show videos.
    #[command(subcommand)]
    Live(LiveCommand),
    /// Manage study mindmaps.
    #[command(subcommand)]
    Mindmap(MindmapCommand),
    /// Manage blog posts.
    #[command(subcommand)]
    Post(PostCommand),

    /// List reader comments: the admin view by default, or one post's
    /// public thread when --post-id is given.
    Comments {
        #[arg(long)]
        post_id: Option<i64>,
    },
    /// Upload a file and print the stored URL.
    Upload {
        file: PathBuf,
        #[arg(long, value_enum)]
        target: TargetArg,
    },
    /// Post a comment through the public blog endpoint.
    Comment {
        /// Defaults to blog_post_id from the config.
        #[arg(long)]
        post_id: Option<i64>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Subscribe an email address through the public blog endpoint.
    Subscribe { email: String },
    /// Render a public page from seed data (plus the live overlay).
    Show {
        #[arg(value_enum)]
        page: PageArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    List,
    Create(ProjectArgs),
    Update {
        id: String,
        #[command(flatten)]
        args: ProjectArgs,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum LiveCommand {
    List,
    Create(LiveArgs),
    Update {
        id: String,
        #[command(flatten)]
        args: LiveArgs,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum MindmapCommand {
    List,
    Create(MindmapArgs),
    Update {
        id: String,
        #[command(flatten)]
        args: MindmapArgs,
    },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    List,
    Create(PostArgs),
    Update {
        id: String,
        #[command(flatten)]
        args: PostArgs,
    },
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub summary: String,
    /// Repeatable, one stack entry each.
    #[arg(long = "stack")]
    pub stack: Vec<String>,
    /// Repeatable, one highlight each.
    #[arg(long = "highlight")]
    pub highlights: Vec<String>,
    /// Cover URL (absolute or root-relative).
    #[arg(long, conflicts_with = "upload_cover")]
    pub cover: Option<String>,
    /// Local image to upload into the cover field.
    #[arg(long)]
    pub upload_cover: Option<PathBuf>,
    /// Bare year or YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
    /// Repeatable, `Label|URL` or a bare URL.
    #[arg(long = "link")]
    pub links: Vec<String>,
}

#[derive(Debug, Args)]
pub struct LiveArgs {
    #[arg(long)]
    pub title: String,
    /// Bare year or YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Video URL.
    #[arg(long, conflicts_with = "upload_file")]
    pub file: Option<String>,
    /// Local video to upload into the file field.
    #[arg(long)]
    pub upload_file: Option<PathBuf>,
    #[arg(long, conflicts_with = "upload_cover")]
    pub cover: Option<String>,
    #[arg(long)]
    pub upload_cover: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct MindmapArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub summary: Option<String>,
    /// Repeatable; each value may itself be comma-separated.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Mindmap file URL (PDF or image).
    #[arg(long, conflicts_with = "upload_file")]
    pub file: Option<String>,
    /// Local file to upload into the file field.
    #[arg(long)]
    pub upload_file: Option<PathBuf>,
    /// Bare year or YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub updated: Option<String>,
}

#[derive(Debug, Args)]
pub struct PostArgs {
    /// Left out to derive from title and date.
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub title: String,
    /// Bare year or YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long, conflicts_with = "upload_cover")]
    pub cover: Option<String>,
    #[arg(long)]
    pub upload_cover: Option<PathBuf>,
    #[arg(long)]
    pub excerpt: Option<String>,
    /// `published` or `draft`.
    #[arg(long, default_value = "published")]
    pub status: PostStatus,
    /// Repeatable, one paragraph each.
    #[arg(long = "para")]
    pub content: Vec<String>,
    /// Repeatable, one tag each.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetArg {
    ProjectCover,
    LiveCover,
    LiveFile,
    MindmapFile,
    BlogCover,
}

impl From<TargetArg> for UploadTarget {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::ProjectCover => UploadTarget::ProjectCover,
            TargetArg::LiveCover => UploadTarget::LiveCover,
            TargetArg::LiveFile => UploadTarget::LiveFile,
            TargetArg::MindmapFile => UploadTarget::MindmapFile,
            TargetArg::BlogCover => UploadTarget::BlogCover,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PageArg {
    Projects,
    Live,
    Mindmaps,
    Records,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_create_parses_repeated_flags() {
        let cli = Cli::parse_from([
            "folio", "project", "create",
            "--name", "Folio",
            "--summary", "Site",
            "--stack", "Rust",
            "--stack", "Tokio",
            "--link", "GitHub|https://github.com/x",
        ]);
        match cli.command {
            Command::Project(ProjectCommand::Create(args)) => {
                assert_eq!(args.stack, vec!["Rust", "Tokio"]);
                assert_eq!(args.links, vec!["GitHub|https://github.com/x"]);
                assert!(args.date.is_none());
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_post_status_defaults_to_published() {
        let cli = Cli::parse_from(["folio", "post", "create", "--title", "Hi", "--para", "Body."]);
        match cli.command {
            Command::Post(PostCommand::Create(args)) => {
                assert_eq!(args.status, PostStatus::Published);
                assert!(args.slug.is_none());
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_cover_url_and_upload_conflict() {
        let result = Cli::try_parse_from([
            "folio", "post", "create",
            "--title", "Hi",
            "--cover", "/blog/a.jpg",
            "--upload-cover", "a.jpg",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_upload_target_value_enum() {
        let cli = Cli::parse_from(["folio", "upload", "a.pdf", "--target", "mindmap-file"]);
        match cli.command {
            Command::Upload { target, .. } => {
                assert_eq!(UploadTarget::from(target), UploadTarget::MindmapFile);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }
}
