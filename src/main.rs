//! CLI entry point for cabstats.
//!
//! Reads a taxi trip CSV, keeps the longest trips per vendor and prints
//! totals and per-vendor averages, or exports the ranked trips to CSV.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use cabstats::analyzers::analyzer::analyze;
use cabstats::config::{DEFAULT_TOP_N, input_path};
use cabstats::logging::{LOG_FILE_ENV_VAR, rolling_appender};
use cabstats::output::{export_csv, write_json, write_text};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cabstats")]
#[command(about = "Summarize taxi trip records per vendor", long_about = None)]
struct Cli {
    /// Path to the trip CSV (defaults to $CABSTATS_FILE, then ./yellow_tripdata_2020-04.csv)
    #[arg(short, long = "file", value_name = "FILE", global = true)]
    file: Option<PathBuf>,

    /// Number of trips kept per vendor
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N, global = true)]
    top: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print totals and the longest trips per vendor (default)
    Report {
        /// Report format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write the longest trips per vendor to a CSV file
    Export {
        /// CSV file to write
        #[arg(short, long, default_value = "top_trips.csv")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let _file_guard = init_tracing();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Report {
        format: Format::Text,
    });

    let path = input_path(cli.file)?;
    let report = analyze(&path, cli.top)?;

    match command {
        Commands::Report { format } => {
            let mut stdout = std::io::stdout().lock();
            match format {
                Format::Text => write_text(&mut stdout, &report)?,
                Format::Json => write_json(&mut stdout, &report)?,
            }
            stdout.flush()?;
        }
        Commands::Export { output } => {
            let rows = export_csv(&output, &report)?;
            info!(rows, output = %output.display(), "Export finished");
        }
    }

    Ok(())
}

/// Logging setup: colored stderr, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set.
///
/// A log file that cannot be opened is reported on stderr and skipped. The
/// returned guard flushes the file writer when dropped.
fn init_tracing() -> Option<WorkerGuard> {
    let file_writer = std::env::var_os(LOG_FILE_ENV_VAR)
        .filter(|p| !p.is_empty())
        .map(|p| rolling_appender(Path::new(&p)));

    let (file_writer, file_error) = match file_writer {
        Some(Ok(appender)) => (Some(tracing_appender::non_blocking(appender)), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };
    let (non_blocking_file, guard) = file_writer.unzip();

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = non_blocking_file.map(|writer| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(writer)
            .with_filter(env_filter("RUST_LOG_JSON", "debug"))
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    if let Some(e) = file_error {
        let error = format!("{e:#}");
        warn!(%error, "Log file disabled");
    }

    guard
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
