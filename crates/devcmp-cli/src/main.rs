//! devcmp command-line tool
//!
//! Compares object lists between two firewall devices through the console
//! API, or between two JSON files on disk.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use devcmp_client::{ComparisonSession, ConsoleClient, SelectOutcome};
use devcmp_compare::{
    CompareOptions, ComparisonContext, ComparisonReport, MemoryRenderer, RenderSink,
    TracingNotifier,
};
use devcmp_config::ConsoleConfig;
use devcmp_core::{ListSide, ObjectCategory, ObjectList};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "devcmp",
    version,
    about = "Compare configuration objects between two firewall devices"
)]
struct Cli {
    /// YAML config file; missing files fall back to defaults
    #[arg(long, env = "DEVCMP_CONFIG", default_value = "devcmp.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List devices available for comparison
    Devices {
        /// Include devices of every vendor
        #[arg(long)]
        all: bool,
    },
    /// Compare one object category between two devices
    Compare(CompareArgs),
    /// Compare two JSON files holding arrays of named objects
    #[command(name = "diff-files")]
    DiffFiles(DiffFilesArgs),
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Object category, e.g. tags, addresses, nat
    category: ObjectCategory,
    /// Device id for list A
    device_a: String,
    /// Device id for list B
    device_b: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct DiffFilesArgs {
    file_a: PathBuf,
    file_b: PathBuf,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the full report as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Compare lists that repeat a name instead of failing
    #[arg(long)]
    allow_duplicates: bool,
}

impl OutputArgs {
    fn options(&self, config: &ConsoleConfig) -> CompareOptions {
        CompareOptions {
            reject_duplicate_names: config.reject_duplicate_names && !self.allow_duplicates,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConsoleConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    debug!(base_url = %config.base_url, "Config loaded");

    match cli.command {
        Commands::Devices { all } => list_devices(&config, all).await,
        Commands::Compare(args) => compare_devices(&config, args).await,
        Commands::DiffFiles(args) => diff_files(&config, args),
    }
}

async fn list_devices(config: &ConsoleConfig, all: bool) -> Result<()> {
    let client = ConsoleClient::from_config(config)?;
    let devices = if all {
        client.list_devices().await?
    } else {
        client.comparable_devices(&config.vendor).await?
    };

    info!(count = devices.len(), "Devices loaded");
    for device in &devices {
        println!(
            "{:<12} {:<32} {:<12} {}",
            device.device_id,
            device.device_name,
            device.vendor.as_deref().unwrap_or("-"),
            device.ha_state.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn compare_devices(config: &ConsoleConfig, args: CompareArgs) -> Result<()> {
    let client = ConsoleClient::from_config(config)?;
    let category = args.category;
    let mut session = ComparisonSession::new(client, category, args.output.options(config));
    let mut view = renderer(config, category.as_str());
    let notifier = TracingNotifier;

    for (side, device_id) in [(ListSide::A, &args.device_a), (ListSide::B, &args.device_b)] {
        let outcome = session
            .select_device(side, device_id, &mut view, &notifier)
            .await;
        if outcome == SelectOutcome::Failed {
            bail!("Could not load {} from device {}", category.label(), device_id);
        }
    }

    let Some(report) = session.compare(&mut view, &notifier) else {
        bail!("Comparison of {} failed", category.label());
    };

    let label = format!(
        "{} ({} vs {})",
        category.label(),
        args.device_a,
        args.device_b
    );
    print_report(&view, &report, &label, args.output.json)
}

fn diff_files(config: &ConsoleConfig, args: DiffFilesArgs) -> Result<()> {
    let list_a = load_object_file(&args.file_a)?;
    let list_b = load_object_file(&args.file_b)?;
    let mut view = renderer(config, "file");

    let report = compare_lists(list_a, list_b, args.output.options(config), &mut view)?;

    let label = format!("{} vs {}", args.file_a.display(), args.file_b.display());
    print_report(&view, &report, &label, args.output.json)
}

fn compare_lists(
    list_a: ObjectList,
    list_b: ObjectList,
    options: CompareOptions,
    view: &mut MemoryRenderer,
) -> Result<ComparisonReport> {
    view.show_list(ListSide::A, &list_a);
    view.show_list(ListSide::B, &list_b);
    let mut context = ComparisonContext::new(list_a, list_b).with_options(options);
    Ok(context.run(view)?)
}

fn load_object_file(path: &Path) -> Result<ObjectList> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of objects", path.display()))
}

fn renderer(config: &ConsoleConfig, prefix: &str) -> MemoryRenderer {
    MemoryRenderer::new(format!("{}A", prefix), format!("{}B", prefix))
        .with_viewport_width(f64::from(config.viewport_width))
}

fn print_report(
    view: &MemoryRenderer,
    report: &ComparisonReport,
    label: &str,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", view.render_text());
        println!();
        report.print_summary(label);
    }
    Ok(())
}
