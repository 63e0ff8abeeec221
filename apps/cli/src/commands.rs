//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use glean_core::pipeline::{MoviesConfig, MoviesResult, ProgressReporter};
use glean_outline::OutlineClient;
use glean_server::AppState;
use glean_shared::{AppConfig, RatingRange, build_client, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::prompt::prompt_rating_range;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Glean: scrape listings and reference pages into structured output.
#[derive(Parser)]
#[command(
    name = "glean",
    version,
    about = "Enrich movie listings into JSON and serve reference-page outlines.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Search listings by rating range, enrich each result, and write JSON.
    Movies {
        /// Minimum rating (0-10). Prompted for when omitted.
        #[arg(long, requires = "max")]
        min: Option<f64>,

        /// Maximum rating (0-10). Prompted for when omitted.
        #[arg(long, requires = "min")]
        max: Option<f64>,

        /// Output file (defaults to the configured output_path).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the heading outline of a reference page.
    Outline {
        /// Topic name, e.g. "New Zealand".
        topic: String,
    },

    /// Start the outline HTTP server.
    Serve {
        /// Bind address (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,

        /// Port (defaults to $PORT, then the configured port).
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "glean=info,tower_http=info",
        1 => "glean=debug,tower_http=debug",
        _ => "glean=trace,tower_http=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Movies { min, max, out } => cmd_movies(min, max, out).await,
        Command::Outline { topic } => cmd_outline(&topic).await,
        Command::Serve { host, port } => cmd_serve(host, port).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

async fn cmd_movies(min: Option<f64>, max: Option<f64>, out: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;

    let range = match (min, max) {
        (Some(min), Some(max)) => RatingRange::new(min, max)?,
        _ => {
            println!();
            println!("  Movie Data Extractor");
            println!("  {}", "-".repeat(20));
            prompt_rating_range()?
        }
    };

    let output_path = out.unwrap_or_else(|| PathBuf::from(&config.listing.output_path));

    let movies_config = MoviesConfig {
        range,
        http: config.http.clone(),
        listing: config.listing.clone(),
        details: config.details.clone(),
        output_path,
    };

    info!(min = range.min(), max = range.max(), "fetching movies");

    let reporter = CliProgress::new();
    let result = match glean_core::pipeline::run_movies(&movies_config, &reporter).await {
        Ok(result) => result,
        Err(e) => {
            reporter.spinner.finish_and_clear();
            return Err(eyre!(e));
        }
    };

    println!();
    println!("  Processed {} movies.", result.records.len());
    println!("  Enriched: {}", result.enriched);
    println!("  Fallback: {}", result.fallbacks);
    println!("  Saved to: {}", result.output_path.display());
    println!("  Time:     {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn stubs_found(&self, count: usize) {
        self.spinner
            .set_message(format!("Found {count} movies, fetching details"));
    }

    fn done(&self, _result: &MoviesResult) {
        self.spinner.finish_and_clear();
    }
}

async fn cmd_outline(topic: &str) -> Result<()> {
    let config = load_config()?;
    let client = outline_client(&config)?;

    let outline = client.fetch_outline(topic).await?;
    println!("{outline}");
    Ok(())
}

async fn cmd_serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let state = AppState {
        outline: outline_client(&config)?,
    };

    println!("Serving outlines on http://{host}:{port}/outline?country=<topic>");
    glean_server::serve(state, &host, port).await?;
    Ok(())
}

fn outline_client(config: &AppConfig) -> Result<OutlineClient> {
    let client = build_client(&config.http)?;
    Ok(OutlineClient::new(client, &config.outline.reference_base)?)
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movies_with_bounds() {
        let cli = Cli::try_parse_from(["glean", "movies", "--min", "8.5", "--max", "7"]).unwrap();
        match cli.command {
            Command::Movies { min, max, out } => {
                assert_eq!(min, Some(8.5));
                assert_eq!(max, Some(7.0));
                assert!(out.is_none());
            }
            _ => panic!("expected movies command"),
        }
    }

    #[test]
    fn movies_bounds_come_in_pairs() {
        assert!(Cli::try_parse_from(["glean", "movies", "--min", "8"]).is_err());
    }

    #[test]
    fn parses_outline_topic() {
        let cli = Cli::try_parse_from(["glean", "-v", "outline", "New Zealand"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Command::Outline { ref topic } if topic == "New Zealand"));
    }

    #[test]
    fn parses_serve_port() {
        let cli = Cli::try_parse_from(["glean", "serve", "--port", "9100"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { port: Some(9100), .. }));
    }
}
