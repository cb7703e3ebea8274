// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line interface for the views-badge binary.
//!
//! The CLI exposes a pure `render` subcommand for previewing badges and a
//! `generate` subcommand that runs the full pipeline: resolve the view
//! count, render the badge, persist the artifacts locally, and publish them
//! to a Gist when credentials are available. All configuration precedence
//! (flag over environment over default) is resolved here; the renderer
//! itself never reads process state.

use std::{env, io, path::PathBuf, process};

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use octocrab::Octocrab;
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use views_badge::{
    BadgeStyle, Error, GistPublishResult, ViewSource, publish_badge, render_badge, resolve_views,
    save_views, write_badge
};

/// Command line interface for the badge generator.
#[derive(Debug, Parser)]
#[command(name = "views-badge", version, about = "Render a GitHub profile view-counter badge")]
struct Cli {
    #[command(subcommand)]
    command: Command
}

#[derive(Debug, Subcommand)]
/// Supported commands exposed by the CLI.
enum Command {
    /// Render a badge for a fixed view count without touching any counter.
    Render(RenderArgs),
    /// Resolve the view count, render the badge and publish the artifacts.
    Generate(GenerateArgs)
}

#[derive(Debug, Args)]
/// Arguments accepted by the `render` subcommand.
struct RenderArgs {
    /// View count to display.
    #[arg(long = "views", value_name = "COUNT")]
    views: u64,

    /// Badge style (classic, animated; aliases: simple, basic, advanced,
    /// fancy). Unrecognized values fall back to animated.
    #[arg(long = "style", value_name = "STYLE", env = "BADGE_STYLE", default_value = "animated")]
    style: BadgeStyle,

    /// Destination file; the SVG is printed to stdout when omitted.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf>
}

#[derive(Debug, Args)]
/// Arguments accepted by the `generate` subcommand.
struct GenerateArgs {
    /// Badge style (classic, animated; aliases: simple, basic, advanced,
    /// fancy). Unrecognized values fall back to animated.
    #[arg(long = "style", value_name = "STYLE", env = "BADGE_STYLE", default_value = "animated")]
    style: BadgeStyle,

    /// Destination path for the badge artifact.
    #[arg(long = "badge-file", value_name = "PATH", default_value = "badge.svg")]
    badge_file: PathBuf,

    /// Destination path for the counter record.
    #[arg(long = "counter-file", value_name = "PATH", default_value = "views-count.json")]
    counter_file: PathBuf,

    /// GitHub token used for the Traffic API and Gist access.
    #[arg(long = "token", value_name = "TOKEN", env = "GH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Gist holding the published badge and counter.
    #[arg(long = "gist-id", value_name = "ID", env = "GIST_ID")]
    gist_id: Option<String>,

    /// Repository slug used to derive the profile repository.
    #[arg(long = "repository", value_name = "OWNER/REPO", env = "GITHUB_REPOSITORY")]
    repository: Option<String>
}

/// Outcome of a `generate` run, emitted as JSON on stdout.
#[derive(Debug, Serialize)]
struct GenerateSummary {
    views:      u64,
    source:     String,
    style:      BadgeStyle,
    badge_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    gist:       Option<GistPublishResult>
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from rendering, persistence and the GitHub
/// API.
async fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => run_render(args),
        Command::Generate(args) => run_generate(args).await
    }
}

fn run_render(args: RenderArgs) -> Result<(), Error> {
    match args.output {
        Some(path) => write_badge(&path, args.views, args.style),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_rendered_badge(&mut handle, args.views, args.style)
        }
    }
}

fn write_rendered_badge<W: io::Write>(
    writer: &mut W,
    views: u64,
    style: BadgeStyle
) -> Result<(), Error> {
    let svg = render_badge(views, style);
    writer
        .write_all(svg.as_bytes())
        .map_err(|source| Error::service(format!("failed to write badge to stream: {source}")))?;
    Ok(())
}

async fn run_generate(args: GenerateArgs) -> Result<(), Error> {
    let summary = execute_generate(args).await?;

    if let Some(gist) = &summary.gist
        && gist.created
    {
        eprintln!("store this id as the GIST_ID secret for subsequent runs: {}", gist.gist_id);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &summary)?;

    Ok(())
}

async fn execute_generate(args: GenerateArgs) -> Result<GenerateSummary, Error> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} [{elapsed_precise}] {msg}")
            .expect("valid template")
    );

    let token = args
        .token
        .or_else(|| env::var("GITHUB_TOKEN").ok())
        .filter(|value| !value.is_empty());

    let client = match token {
        Some(token) => Some(
            Octocrab::builder()
                .personal_token(token)
                .build()
                .map_err(|e| Error::service(format!("failed to initialize GitHub client: {e}")))?
        ),
        None => {
            warn!("no GitHub token configured, falling back to the local counter");
            None
        }
    };

    pb.set_message("Resolving view count...");
    let (views, source) = resolve_views(
        client.as_ref(),
        args.repository.as_deref(),
        args.gist_id.as_deref(),
        &args.counter_file
    )
    .await?;

    pb.set_message(format!("Rendering {} badge for {views} views...", args.style));
    write_badge(&args.badge_file, views, args.style)?;
    let record = save_views(&args.counter_file, views)?;

    let gist = match &client {
        Some(client) => {
            pb.set_message("Publishing badge to gist...");
            let badge_svg = render_badge(views, args.style);
            match publish_badge(client, args.gist_id.as_deref(), &badge_svg, &record).await {
                Ok(result) => Some(result),
                Err(error) => {
                    warn!("failed to publish gist, local artifacts were saved: {error}");
                    None
                }
            }
        }
        None => None
    };

    pb.finish_with_message(format!("Badge generated: {views} views via {source}"));

    Ok(GenerateSummary {
        views,
        source: source_label(source),
        style: args.style,
        badge_file: args.badge_file.display().to_string(),
        gist
    })
}

fn source_label(source: ViewSource) -> String {
    match source {
        ViewSource::Traffic => "traffic".to_owned(),
        ViewSource::Gist => "gist".to_owned(),
        ViewSource::LocalCounter => "local".to_owned()
    }
}
