//! Sitetrawl main entry point
//!
//! This is the command-line host for the sitetrawl crawler.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sitetrawl::config::{load_config_with_hash, ContentTypePreference, CrawlConfig, OutputFormat};
use sitetrawl::crawler::crawl;
use sitetrawl::output::{structured_view, table_view};
use sitetrawl::url::parse_seed;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitetrawl: a breadth-first site crawler
///
/// Sitetrawl crawls a website from a seed URL within depth and domain
/// limits, extracts structured content from HTML pages, passes JSON
/// responses through, and prints the result as JSON.
#[derive(Parser, Debug)]
#[command(name = "sitetrawl")]
#[command(version)]
#[command(about = "A breadth-first site crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth from the seed (0 crawls the seed only)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// How to treat response bodies
    #[arg(long, value_enum)]
    content_type: Option<ContentTypeArg>,

    /// Follow links to other hosts
    #[arg(long)]
    all_domains: bool,

    /// Render pages with a headless browser when available
    #[arg(long)]
    render: bool,

    /// Which view to print
    #[arg(long, value_enum, default_value_t = View::Structured)]
    view: View,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Structured,
    FlatText,
    Table,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Structured => Self::Structured,
            FormatArg::FlatText => Self::FlatText,
            FormatArg::Table => Self::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContentTypeArg {
    Auto,
    Json,
    Html,
}

impl From<ContentTypeArg> for ContentTypePreference {
    fn from(arg: ContentTypeArg) -> Self {
        match arg {
            ContentTypeArg::Auto => Self::Auto,
            ContentTypeArg::Json => Self::Json,
            ContentTypeArg::Html => Self::Html,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Structured,
    Table,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let seed = parse_seed(&cli.url).with_context(|| format!("invalid seed URL {:?}", cli.url))?;
    let config = apply_overrides(load_base_config(cli.config.as_ref())?, &cli);

    let records = match crawl(seed.as_str(), config.clone()).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let payload = match cli.view {
        View::Structured => structured_view(&records, config.output_format),
        View::Table => serde_json::to_value(table_view(&records))?,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load_base_config(path: Option<&PathBuf>) -> anyhow::Result<CrawlConfig> {
    let Some(path) = path else {
        return Ok(CrawlConfig::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(mut config: CrawlConfig, cli: &Cli) -> CrawlConfig {
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(format) = cli.format {
        config.output_format = format.into();
    }
    if let Some(preference) = cli.content_type {
        config.content_type_preference = preference.into();
    }
    if cli.all_domains {
        config.same_domain_only = false;
    }
    if cli.render {
        config.enable_js_rendering = true;
    }
    config
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the JSON payload.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitetrawl=info,warn"),
            1 => EnvFilter::new("sitetrawl=debug,info"),
            2 => EnvFilter::new("sitetrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
