use analytics::{parse_price_rows, prepare_log_returns, RawPriceRow};
use anyhow::Context;
use api_client::{ApiClient, HttpApiClient};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use configuration::{init_tracing, load_config, Config, OutputFormat};
use dashboard::{Dashboard, FilterParams};
use indicatif::{ProgressBar, ProgressStyle};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod render;

/// The main entry point for the brentwatch dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; it only supplies BRENTWATCH__* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Status => handle_status(&config).await,
        Commands::Dashboard(args) => {
            args.apply(&mut config);
            config.validate().context("Invalid dashboard options")?;
            handle_dashboard(&config, args.watch).await
        }
        Commands::Serve(args) => {
            args.apply(&mut config);
            web_server::run_server(&config.server).await
        }
        Commands::Prepare(args) => handle_prepare(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A terminal dashboard for Brent oil change-point analysis results.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ./brentwatch.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the results API is reachable.
    Status,
    /// Fetch the results, apply the filters, and render the dashboard.
    Dashboard(DashboardArgs),
    /// Serve the precomputed result files over HTTP.
    Serve(ServeArgs),
    /// Compute log returns from a raw `Date,Price` file.
    Prepare(PrepareArgs),
}

#[derive(Parser)]
struct DashboardArgs {
    /// Keep log returns strictly after this date (format: YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Keep log returns strictly before this date (format: YYYY-MM-DD).
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Only show events whose description contains this text (case-insensitive).
    #[arg(long)]
    keyword: Option<String>,

    /// Hide the matched-events panel.
    #[arg(long)]
    hide_events: bool,

    /// Also keep points that fall exactly on --start or --end.
    #[arg(long)]
    inclusive: bool,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Refresh every N seconds until Ctrl-C.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    watch: Option<u64>,
}

impl DashboardArgs {
    fn apply(&self, config: &mut Config) {
        let filters = &mut config.filters;
        if self.start.is_some() {
            filters.start_date = self.start;
        }
        if self.end.is_some() {
            filters.end_date = self.end;
        }
        if let Some(keyword) = &self.keyword {
            filters.keyword = keyword.clone();
        }
        if self.hide_events {
            filters.show_events = false;
        }
        if self.inclusive {
            filters.inclusive_bounds = true;
        }
        if let Some(format) = self.format {
            config.display.format = format;
        }
    }
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on (e.g., "127.0.0.1:5000").
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory holding change_points.csv and matched_events.csv.
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Directory holding brent_oil_log_returns.csv.
    #[arg(long)]
    processed_dir: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        let server = &mut config.server;
        if let Some(bind) = self.bind {
            server.bind = bind;
        }
        if let Some(dir) = self.results_dir {
            server.results_dir = dir;
        }
        if let Some(dir) = self.processed_dir {
            server.processed_dir = dir;
        }
    }
}

#[derive(Parser)]
struct PrepareArgs {
    /// Raw price file with `Date` and `Price` columns.
    #[arg(long)]
    input: PathBuf,

    /// Where to write `Date,Price,LogReturn`.
    #[arg(long)]
    output: PathBuf,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_status(config: &Config) -> anyhow::Result<()> {
    let client = HttpApiClient::new(&config.api)?;
    let message = client
        .fetch_status()
        .await
        .with_context(|| format!("API at {} is not reachable", client.base_url()))?;
    println!("{message}");
    Ok(())
}

async fn handle_dashboard(config: &Config, watch: Option<u64>) -> anyhow::Result<()> {
    let client = HttpApiClient::new(&config.api)?;
    tracing::info!(base_url = client.base_url(), "Starting dashboard.");
    let mut dashboard = Dashboard::new(Arc::new(client), FilterParams::from(&config.filters));

    let Some(secs) = watch else {
        return refresh_and_render(&mut dashboard, config).await;
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    loop {
        tokio::select! {
            _ = ticker.tick() => refresh_and_render(&mut dashboard, config).await?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping dashboard.");
                return Ok(());
            }
        }
    }
}

async fn refresh_and_render(dashboard: &mut Dashboard, config: &Config) -> anyhow::Result<()> {
    let format = config.display.format;

    let spinner = (format == OutputFormat::Table).then(fetch_spinner).transpose()?;
    dashboard.refresh().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let view = dashboard.view()?;
    match format {
        OutputFormat::Table => println!("{}", render::DashboardReport::new(&view, &config.display)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn fetch_spinner() -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Fetching results...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn handle_prepare(args: PrepareArgs) -> anyhow::Result<()> {
    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let raw = reader
        .deserialize::<RawPriceRow>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read prices from {}", args.input.display()))?;

    let returns = prepare_log_returns(&parse_price_rows(raw));

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for row in &returns {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Wrote {} log returns to {}", returns.len(), args.output.display());
    Ok(())
}
