//! flixrow - browse TMDB movies and TV series from the terminal.

/// Application configuration (TOML).
mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::AppConfig;
use flixrow_api::tmdb::{ImageSize, LocalTmdbApi, TmdbClient, TmdbMovie, TmdbSeries};
use flixrow_catalog::{Catalog, DetailStatus, MediaItem};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Load the hero item and every category row.
    Browse,
    /// Resolve the trailer for a title.
    Trailer(TrailerArgs),
    /// Show extended details for a title.
    Details(TitleArgs),
    /// Submit a search query.
    Search(SearchArgs),
    /// Config file operations.
    Config(ConfigCommand),
}

/// Identifies a single movie or TV series.
#[derive(clap::Args)]
struct TitleArgs {
    /// TMDB ID.
    #[arg(long)]
    id: u64,

    /// Treat the ID as a TV series instead of a movie.
    #[arg(long)]
    tv: bool,
}

/// Arguments for the `trailer` subcommand.
#[derive(clap::Args)]
struct TrailerArgs {
    /// Title to play.
    #[command(flatten)]
    title: TitleArgs,

    /// Open the trailer in the default browser.
    #[arg(long)]
    open: bool,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query.
    query: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write the default config file if none exists.
    Init,
    /// Show the effective configuration.
    Show,
}

/// Builds a TMDB client from the config file.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or lists no usable key.
#[instrument(skip_all)]
fn build_tmdb_client(dir: Option<&Path>) -> Result<TmdbClient> {
    let path = AppConfig::resolve_path(dir)?;
    let config = AppConfig::load(&path)?;

    TmdbClient::builder()
        .api_keys(config.tmdb.api_keys)
        .language(config.tmdb.language)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Looks up the title behind `args`, falling back to a bare `#id` entry
/// when the details request fails.
async fn resolve_item(client: &TmdbClient, args: &TitleArgs) -> MediaItem {
    let found = if args.tv {
        client.tv_details(args.id).await.map(MediaItem::from)
    } else {
        client.movie_details(args.id).await.map(MediaItem::from)
    };
    found.unwrap_or_else(|| bare_item(args))
}

/// Item carrying only an ID and a synthetic title.
fn bare_item(args: &TitleArgs) -> MediaItem {
    let title = format!("#{}", args.id);
    if args.tv {
        MediaItem::Series(TmdbSeries {
            id: args.id,
            name: title,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            first_air_date: None,
            vote_average: None,
            genre_ids: Vec::new(),
            origin_country: Vec::new(),
        })
    } else {
        MediaItem::Movie(TmdbMovie {
            id: args.id,
            title,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: None,
            genre_ids: Vec::new(),
        })
    }
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&Path>) -> Result<()> {
    let catalog = Catalog::new(build_tmdb_client(dir)?);
    catalog.load().await;
    let screen = catalog.snapshot();

    if let Some(hero) = screen.featured() {
        tracing::info!("Featured: {} ({})", hero.display_title(), hero.kind());
        tracing::info!("  {}", hero.overview());
        tracing::info!("  {}", hero.backdrop_url(ImageSize::BACKDROP));
    }

    for bucket in screen.buckets() {
        tracing::info!("--- {} ({} titles)", bucket.title(), bucket.items().len());
        for item in bucket.items() {
            tracing::info!(
                "  {:>8}  {:<5}  {}  {}",
                item.id(),
                item.kind(),
                item.display_title(),
                item.poster_url(ImageSize::POSTER),
            );
        }
    }

    Ok(())
}

/// Runs the `trailer` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the browser cannot be opened.
#[instrument(skip_all)]
async fn run_trailer(args: &TrailerArgs, dir: Option<&Path>) -> Result<()> {
    let client = Arc::new(build_tmdb_client(dir)?);
    let item = resolve_item(&client, &args.title).await;

    let catalog = Catalog::from_arc(client);
    let selection = catalog.play(&item).await;

    tracing::info!("Title: {}", selection.title);
    let Some(url) = selection.watch_url() else {
        return Ok(());
    };
    tracing::info!("Trailer: {url}");

    if args.open {
        open::that(&url).with_context(|| format!("failed to open {url}"))?;
    }
    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build.
#[instrument(skip_all)]
async fn run_details(args: &TitleArgs, dir: Option<&Path>) -> Result<()> {
    let client = Arc::new(build_tmdb_client(dir)?);
    let item = resolve_item(&client, args).await;

    let catalog = Catalog::from_arc(client);
    let detail = catalog.more_info(&item).await;

    tracing::info!("Title: {}", detail.title());
    match &detail.status {
        DetailStatus::Loaded(extended) => {
            let facts = extended.facts();
            if !facts.is_empty() {
                tracing::info!("{}", facts.join("  "));
            }
            tracing::info!("{}", detail.overview());
            if let Some(genres) = extended.genres_label() {
                tracing::info!("Genres: {genres}");
            }
        }
        DetailStatus::Loading | DetailStatus::Unavailable => {
            tracing::info!("{}", detail.overview());
        }
    }

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build.
fn run_search(args: &SearchArgs, dir: Option<&Path>) -> Result<()> {
    let catalog = Catalog::new(build_tmdb_client(dir)?);
    catalog.search(&args.query);
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file cannot be written.
fn run_config_init(dir: Option<&Path>) -> Result<()> {
    let path = AppConfig::resolve_path(dir)?;
    if path.exists() {
        tracing::info!("Config already exists: {}", path.display());
        return Ok(());
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
fn run_config_show(dir: Option<&Path>) -> Result<()> {
    let path = AppConfig::resolve_path(dir)?;
    let config = AppConfig::load(&path)?;

    tracing::info!("Path: {}", path.display());
    tracing::info!("Language: {}", config.tmdb.language);
    tracing::info!("API keys: {}", config.tmdb.api_keys.len());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_deref();
    match cli.command {
        Commands::Browse => run_browse(dir).await,
        Commands::Trailer(args) => run_trailer(&args, dir).await,
        Commands::Details(args) => run_details(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir),
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init => run_config_init(dir),
            ConfigSubcommands::Show => run_config_show(dir),
        },
    }
}
