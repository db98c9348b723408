use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use newsgrep::config::Config;
use newsgrep::feed::{self, FeedFetcher};
use newsgrep::render::{self, Format};
use newsgrep::{HostContext, Query};

/// Get the default config file path (~/.config/newsgrep/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("newsgrep")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "newsgrep", about = "Search Google News from the command line")]
struct Args {
    /// Search terms (joined with spaces)
    query: Vec<String>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Log diagnostics for failed or partial searches to stderr
    #[arg(long)]
    debug: bool,

    /// Run as a privileged user: with --debug, show unparsable responses inline
    #[arg(long)]
    admin: bool,

    /// Column budget for text output (overrides config)
    #[arg(long, value_name = "N")]
    width: Option<usize>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Exit with status 1 when the search fails
    #[arg(long)]
    fail_on_error: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // --debug wins over RUST_LOG so diagnostics are never filtered away
    let filter = if args.debug {
        EnvFilter::new("newsgrep=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let ctx = HostContext::new(
        args.debug || config.debug,
        args.admin || config.privileged,
    );
    let format = args.format.unwrap_or(config.format);
    let width = args.width.unwrap_or(config.width);

    let query = Query::sanitize(&args.query.join(" "));
    let fetcher = FeedFetcher::new().context("Failed to create HTTP client")?;

    let outcome = feed::search(&fetcher, query.as_ref(), &ctx).await;
    tracing::debug!(
        query = ?query.as_ref().map(Query::as_str),
        success = outcome.is_success(),
        items = outcome.items().len(),
        "Search finished"
    );

    print!("{}", render::render(format, query.as_ref(), &outcome, &ctx, width));

    if args.fail_on_error && outcome.is_error() {
        std::process::exit(1);
    }
    Ok(())
}
