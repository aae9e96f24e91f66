//! folio — admin console for the folio portfolio and blog site.

mod cli;
mod config;
mod console;
mod seed;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use folio_client::public_forms::{CommentsClient, SubscribeClient};
use folio_client::roster::LoadState;
use folio_client::upload::UploadTarget;
use folio_common::entities::{BlogPost, LiveVideo, Mindmap, Project};

use crate::cli::{
    Cli, Command, LiveArgs, LiveCommand, MindmapArgs, MindmapCommand, PageArg, PostArgs,
    PostCommand, ProjectArgs, ProjectCommand,
};
use crate::config::Config;
use crate::console::{
    today, BlogPostDraft, Console, LiveVideoDraft, MindmapDraft, ProjectDraft,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    run(cli.command, config).await
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let mut console = Console::new(
        config.api_url.as_deref(),
        config.upload_url.as_deref(),
        config.token_slot(),
    )?;

    match command {
        Command::Login { email, password } => {
            let password = match password.or_else(|| std::env::var("FOLIO_ADMIN_PASSWORD").ok()) {
                Some(password) if !password.is_empty() => password,
                _ => bail!("no password given; pass --password or set FOLIO_ADMIN_PASSWORD"),
            };
            if console.login(&email, &password).await {
                let name = console
                    .session()
                    .user()
                    .map(|user| user.name.clone())
                    .unwrap_or_else(|| email.clone());
                println!("Signed in as {}.", name);
            } else {
                let message = console
                    .session()
                    .error()
                    .unwrap_or("Login failed.")
                    .to_string();
                bail!(message);
            }
        }
        Command::Logout => {
            console.logout().await;
            println!("Signed out.");
        }
        Command::Whoami => {
            console.initialize().await;
            match console.session().user() {
                Some(user) => {
                    let email = user.email.as_deref().unwrap_or("-");
                    println!("{} <{}>", user.name, email);
                }
                None => {
                    let message = console.session().error().unwrap_or("Not signed in.");
                    println!("{}", message);
                }
            }
        }
        Command::Load => {
            console.load_all().await?;
            print_section("projects", console.projects.state(), console.projects.items().len());
            print_section(
                "live videos",
                console.live_videos.state(),
                console.live_videos.items().len(),
            );
            print_section("mindmaps", console.mindmaps.state(), console.mindmaps.items().len());
            print_section(
                "blog posts",
                console.blog_posts.state(),
                console.blog_posts.items().len(),
            );
        }

        Command::Project(command) => run_project(command, &mut console).await?,
        Command::Live(command) => run_live(command, &mut console).await?,
        Command::Mindmap(command) => run_mindmap(command, &mut console).await?,
        Command::Post(command) => run_post(command, &mut console).await?,

        Command::Comments { post_id: Some(post_id) } => {
            let endpoint = config
                .comments_url
                .as_deref()
                .context("comments endpoint not configured; set FOLIO_COMMENTS_API_URL")?;
            let client = CommentsClient::new(endpoint)?;
            for comment in client.list(post_id).await? {
                println!("[{}] {}: {}", comment.created_at, comment.name, comment.message);
            }
        }
        Command::Comments { post_id: None } => {
            for comment in console.list_comments().await? {
                println!(
                    "[{}] post {} | {} <{}>: {}",
                    comment.created_at, comment.post_id, comment.name, comment.email,
                    comment.message
                );
            }
        }
        Command::Upload { file, target } => {
            let url = console.upload(target.into(), &file).await?;
            println!("{}", url);
        }
        Command::Comment { post_id, name, email, message } => {
            let endpoint = config
                .comments_url
                .as_deref()
                .context("comments endpoint not configured; set FOLIO_COMMENTS_API_URL")?;
            let client = CommentsClient::new(endpoint)?;
            let post_id = post_id.unwrap_or(config.blog_post_id);
            client.post(post_id, &name, &email, &message).await?;
            println!("Comment submitted.");
        }
        Command::Subscribe { email } => {
            let endpoint = config
                .subscribe_url
                .as_deref()
                .context("subscribe endpoint not configured; set FOLIO_SUBSCRIBE_API_URL")?;
            let client = SubscribeClient::new(endpoint)?;
            client.subscribe(&email).await?;
            println!("Subscribed {}.", email);
        }
        Command::Show { page } => show_page(page, &config).await,
    }
    Ok(())
}

fn print_section(label: &str, state: &LoadState, count: usize) {
    match state {
        LoadState::Ready => println!("{}: {} loaded", label, count),
        LoadState::Error(message) => println!("{}: error: {}", label, message),
        LoadState::Idle | LoadState::Loading => println!("{}: not loaded", label),
    }
}

// ---------------------------------------------------------------------------
// Content commands
// ---------------------------------------------------------------------------

/// Resolve a cover/file field: a local path is uploaded first and its
/// stored URL takes the field; otherwise the pasted URL is used as-is.
async fn resolve_media(
    console: &Console,
    target: UploadTarget,
    upload: Option<std::path::PathBuf>,
    url: Option<String>,
) -> anyhow::Result<Option<String>> {
    match upload {
        Some(path) => {
            let stored = console.upload(target, &path).await?;
            info!(url = %stored, "uploaded {}", path.display());
            Ok(Some(stored))
        }
        None => Ok(url),
    }
}

async fn project_draft(console: &Console, args: ProjectArgs) -> anyhow::Result<ProjectDraft> {
    let cover =
        resolve_media(console, UploadTarget::ProjectCover, args.upload_cover, args.cover).await?;
    Ok(ProjectDraft {
        name: args.name,
        summary: args.summary,
        stack_input: args.stack.join("\n"),
        highlights_input: args.highlights.join("\n"),
        cover,
        date: args.date.unwrap_or_else(today),
        links_input: args.links.join("\n"),
    })
}

async fn run_project(command: ProjectCommand, console: &mut Console) -> anyhow::Result<()> {
    match command {
        ProjectCommand::List => {
            for project in console.list_projects().await? {
                println!("{}  {}  ({})", project.id, project.name, project.date);
            }
        }
        ProjectCommand::Create(args) => {
            let draft = project_draft(console, args).await?;
            let created = console.create_project(&draft).await?;
            print_project(&created);
        }
        ProjectCommand::Update { id, args } => {
            let draft = project_draft(console, args).await?;
            let updated = console.update_project(&id, &draft).await?;
            print_project(&updated);
        }
        ProjectCommand::Delete { id } => {
            console.delete_project(&id).await?;
            println!("Deleted project {}.", id);
        }
    }
    Ok(())
}

async fn live_draft(console: &Console, args: LiveArgs) -> anyhow::Result<LiveVideoDraft> {
    let file =
        resolve_media(console, UploadTarget::LiveFile, args.upload_file, args.file).await?;
    let cover =
        resolve_media(console, UploadTarget::LiveCover, args.upload_cover, args.cover).await?;
    Ok(LiveVideoDraft {
        title: args.title,
        date: args.date.unwrap_or_else(today),
        description: args.description,
        file,
        cover,
    })
}

async fn run_live(command: LiveCommand, console: &mut Console) -> anyhow::Result<()> {
    match command {
        LiveCommand::List => {
            for video in console.list_live_videos().await? {
                println!("{}  {}  ({})", video.id, video.title, video.date);
            }
        }
        LiveCommand::Create(args) => {
            let draft = live_draft(console, args).await?;
            let created = console.create_live_video(&draft).await?;
            print_live(&created);
        }
        LiveCommand::Update { id, args } => {
            let draft = live_draft(console, args).await?;
            let updated = console.update_live_video(&id, &draft).await?;
            print_live(&updated);
        }
        LiveCommand::Delete { id } => {
            console.delete_live_video(&id).await?;
            println!("Deleted live video {}.", id);
        }
    }
    Ok(())
}

async fn mindmap_draft(console: &Console, args: MindmapArgs) -> anyhow::Result<MindmapDraft> {
    let file =
        resolve_media(console, UploadTarget::MindmapFile, args.upload_file, args.file).await?;
    Ok(MindmapDraft {
        title: args.title,
        summary: args.summary,
        tags_input: args.tags.join("\n"),
        file,
        updated_at: args.updated.unwrap_or_else(today),
    })
}

async fn run_mindmap(command: MindmapCommand, console: &mut Console) -> anyhow::Result<()> {
    match command {
        MindmapCommand::List => {
            for mindmap in console.list_mindmaps().await? {
                println!("{}  {}  (updated {})", mindmap.id, mindmap.title, mindmap.updated_at);
            }
        }
        MindmapCommand::Create(args) => {
            let draft = mindmap_draft(console, args).await?;
            let created = console.create_mindmap(&draft).await?;
            print_mindmap(&created);
        }
        MindmapCommand::Update { id, args } => {
            let draft = mindmap_draft(console, args).await?;
            let updated = console.update_mindmap(&id, &draft).await?;
            print_mindmap(&updated);
        }
        MindmapCommand::Delete { id } => {
            console.delete_mindmap(&id).await?;
            println!("Deleted mindmap {}.", id);
        }
    }
    Ok(())
}

async fn post_draft(console: &Console, args: PostArgs) -> anyhow::Result<BlogPostDraft> {
    let cover =
        resolve_media(console, UploadTarget::BlogCover, args.upload_cover, args.cover).await?;
    Ok(BlogPostDraft {
        slug: args.slug.unwrap_or_default(),
        title: args.title,
        date: args.date.unwrap_or_else(today),
        cover_url: cover,
        excerpt: args.excerpt,
        status: args.status,
        content_input: args.content.join("\n"),
        tags_input: args.tags.join("\n"),
    })
}

async fn run_post(command: PostCommand, console: &mut Console) -> anyhow::Result<()> {
    match command {
        PostCommand::List => {
            for post in console.list_blog_posts().await? {
                println!("{}  {}  [{}]  ({})", post.id, post.slug, post.status.as_str(), post.date);
            }
        }
        PostCommand::Create(args) => {
            let draft = post_draft(console, args).await?;
            let created = console.create_blog_post(&draft).await?;
            print_post(&created);
        }
        PostCommand::Update { id, args } => {
            let draft = post_draft(console, args).await?;
            let updated = console.update_blog_post(&id, &draft).await?;
            print_post(&updated);
        }
        PostCommand::Delete { id } => {
            console.delete_blog_post(&id).await?;
            println!("Deleted blog post {}.", id);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------------

async fn show_page(page: PageArg, config: &Config) {
    match page {
        PageArg::Projects => {
            for project in seed::seed_projects() {
                print_project(&project);
            }
        }
        PageArg::Live => {
            let videos = match &config.live_api_url {
                Some(url) => seed::fetch_live_overlay(url)
                    .await
                    .unwrap_or_else(seed::seed_live_videos),
                None => seed::seed_live_videos(),
            };
            for video in videos {
                print_live(&video);
            }
        }
        PageArg::Mindmaps => {
            for mindmap in seed::seed_mindmaps() {
                print_mindmap(&mindmap);
            }
        }
        PageArg::Records => {
            for record in seed::seed_top_records() {
                let year = record.year.as_deref().unwrap_or("-");
                println!("{}  {} - {} ({})", record.id, record.artist, record.title, year);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn print_project(project: &Project) {
    println!("{}  {}  ({})", project.id, project.name, project.date);
    println!("  {}", project.summary);
    if !project.stack.is_empty() {
        println!("  stack: {}", project.stack.join(", "));
    }
    for highlight in project.highlights.iter().flatten() {
        println!("  - {}", highlight);
    }
    for link in project.links.iter().flatten() {
        println!("  {}: {}", link.label, link.href);
    }
}

fn print_live(video: &LiveVideo) {
    println!("{}  {}  ({})", video.id, video.title, video.date);
    if let Some(description) = &video.description {
        println!("  {}", description);
    }
    println!("  file: {}", video.file);
}

fn print_mindmap(mindmap: &Mindmap) {
    println!("{}  {}  (updated {})", mindmap.id, mindmap.title, mindmap.updated_at);
    if let Some(summary) = &mindmap.summary {
        println!("  {}", summary);
    }
    if let Some(tags) = &mindmap.tags {
        println!("  tags: {}", tags.join(", "));
    }
    println!("  file: {}", mindmap.file);
}

fn print_post(post: &BlogPost) {
    println!("{}  {}  [{}]  ({})", post.id, post.slug, post.status.as_str(), post.date);
    println!("  {}", post.title);
    if let Some(excerpt) = &post.excerpt {
        println!("  {}", excerpt);
    }
}
