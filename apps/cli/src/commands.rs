//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use placepress_core::loader::CatalogFormat;
use placepress_core::pipeline::{BuildConfig, BuildResult, ProgressReporter};
use placepress_notify::{NotifyConfig, NotifyReport, extract_sitemap_urls, write_report};
use placepress_shared::{AppConfig, SiteConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// placepress — publish a local-business directory as a static site.
#[derive(Parser)]
#[command(
    name = "placepress",
    version,
    about = "Build a static directory site from a business/freelancer catalog.",
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
    /// Build the site from a catalog file.
    Build {
        /// Path to the catalog JSON file.
        catalog: String,

        /// Output directory (defaults to [defaults].output_dir).
        #[arg(short, long)]
        out: Option<String>,

        /// Catalog format: auto, export, or static.
        #[arg(short, long)]
        format: Option<String>,

        /// Build date as YYYY-MM-DD (defaults to today). A fixed date makes
        /// rebuilds byte-identical.
        #[arg(long)]
        date: Option<String>,

        /// Submit published URLs to indexing endpoints after the build.
        #[arg(long)]
        notify: bool,

        /// Publish entities regardless of status.
        #[arg(long)]
        include_inactive: bool,
    },

    /// Re-submit the published sitemap to indexing endpoints.
    Notify {
        /// Output directory holding the published site.
        #[arg(short, long)]
        out: Option<String>,
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
    /// Initialize placepress.toml with defaults.
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
        0 => "placepress=info",
        1 => "placepress=debug",
        _ => "placepress=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build {
            catalog,
            out,
            format,
            date,
            notify,
            include_inactive,
        } => {
            cmd_build(
                &catalog,
                out.as_deref(),
                format.as_deref(),
                date.as_deref(),
                notify,
                include_inactive,
            )
            .await
        }
        Command::Notify { out } => cmd_notify(out.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

async fn cmd_build(
    catalog: &str,
    out: Option<&str>,
    format: Option<&str>,
    date: Option<&str>,
    notify: bool,
    include_inactive: bool,
) -> Result<()> {
    let app = load_config()?;

    let format: CatalogFormat = format
        .unwrap_or(&app.defaults.format)
        .parse()
        .map_err(|e| eyre!("{e}"))?;

    let build_date = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| eyre!("invalid --date '{s}': {e} (expected YYYY-MM-DD)"))?,
        None => chrono::Local::now().date_naive(),
    };

    let output_dir = PathBuf::from(out.unwrap_or(&app.defaults.output_dir));
    let include_inactive = include_inactive || app.defaults.include_inactive;

    let config = BuildConfig {
        catalog_path: PathBuf::from(catalog),
        output_dir,
        format,
        app,
        build_date,
        include_inactive,
        notify,
    };

    info!(catalog, notify, "building site");

    let reporter = CliProgress::new();
    let result = placepress_core::pipeline::build(&config, &reporter).await?;

    println!();
    println!("  Site built successfully!");
    println!("  Build:     {}", result.build_id);
    println!("  Entities:  {}", result.entity_count);
    println!("  Documents: {}", result.document_count);
    println!("  Output:    {}", result.out_dir.display());
    println!(
        "  Time:      {:.1}s",
        result.elapsed.as_secs_f64()
    );
    if let Some(report) = &result.notify {
        print_notify_summary(report);
    }
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// notify (standalone)
// ---------------------------------------------------------------------------

async fn cmd_notify(out: Option<&str>) -> Result<()> {
    let app = load_config()?;
    let out_dir = PathBuf::from(out.unwrap_or(&app.defaults.output_dir));

    // Standalone notify has no catalog metadata to fall back on
    let site = SiteConfig::resolve(&app, None)?;

    let sitemap_path = out_dir.join("sitemap.xml");
    let sitemap = std::fs::read_to_string(&sitemap_path).map_err(|e| {
        eyre!(
            "cannot read {}: {e} — run `placepress build` first",
            sitemap_path.display()
        )
    })?;

    let urls = extract_sitemap_urls(&sitemap);
    if urls.is_empty() {
        return Err(eyre!(
            "no URLs found in {} — is it a valid sitemap?",
            sitemap_path.display()
        ));
    }

    println!("  Submitting {} URLs:", urls.len());
    for url in &urls {
        println!("    → {url}");
    }

    let notify_config = NotifyConfig::resolve(&app.notify, &site);
    let date = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let report = placepress_notify::run(&notify_config, &urls, &date).await;

    if let Err(e) = write_report(&report, &out_dir) {
        tracing::warn!(error = %e, "could not persist notification report");
    }

    println!();
    print_notify_summary(&report);
    println!();

    Ok(())
}

fn print_notify_summary(report: &NotifyReport) {
    println!(
        "  Notify:    {} accepted, {} failed ({} URLs submitted)",
        report.accepted_count(),
        report.failure_count(),
        report.urls_submitted
    );
    for outcome in &report.outcomes {
        println!("             {} → {}", outcome.endpoint, outcome.outcome);
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

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
                .unwrap()
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

    fn entity_rendered(&self, id: &str, current: usize, total: usize) {
        self.spinner.set_message(format!(
            "Rendering [{current}/{total}] {id}"
        ));
    }

    fn done(&self, _result: &BuildResult) {
        self.spinner.finish_and_clear();
    }
}
