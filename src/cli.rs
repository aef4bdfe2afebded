//! CLI definition and dispatch.

use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fs_artifact_adapter::FsArtifactSource;
use crate::adapters::pdf_report::PdfReportWriter;
use crate::domain::assembly::{self, AssemblyOutcome, Decision};
use crate::domain::config::ReportConfig;
use crate::domain::config_validation::validate_report_config;
use crate::domain::error::ReportError;
use crate::domain::selection::SelectionKey;

/// Assemble a PDF report from financial-statement tables and chart images.
///
/// With TICKER and TIMESTAMP only artifacts whose file names contain both are
/// used; without them every financial-values table and every image is.
#[derive(Parser, Debug)]
#[command(name = "fvreport", version, about, long_about = None)]
pub struct Cli {
    /// Ticker symbol, e.g. AAPL
    #[arg(requires = "timestamp")]
    pub ticker: Option<String>,

    /// Timestamp string shared by the artifacts of one run, e.g. 2024-01-01_09-30-00
    #[arg(requires = "ticker")]
    pub timestamp: Option<String>,

    /// INI configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output PDF path (default: <output dir>/<TICKER>_<TIMESTAMP>.pdf)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory holding the CSV tables
    #[arg(long, value_name = "DIR")]
    pub table_dir: Option<PathBuf>,

    /// Directory holding the chart images
    #[arg(long, value_name = "DIR")]
    pub image_dir: Option<PathBuf>,

    /// Directory receiving the report
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Show which artifacts would be used without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose, cli.quiet);

    let result = selection_from_args(cli.ticker.as_deref(), cli.timestamp.as_deref())
        .and_then(|selection| build_config(&cli).map(|config| (selection, config)));
    let (selection, config) = match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if cli.dry_run {
        return run_dry_run(&config, selection.as_ref());
    }

    let output = cli.output.clone().unwrap_or_else(|| {
        config.default_output_path(selection.as_ref(), Local::now().naive_local())
    });

    match generate_report(&config, selection.as_ref(), &output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn selection_from_args(
    ticker: Option<&str>,
    timestamp: Option<&str>,
) -> Result<Option<SelectionKey>, ReportError> {
    match (ticker, timestamp) {
        (Some(t), Some(ts)) => SelectionKey::new(t, ts).map(Some),
        (None, None) => Ok(None),
        _ => Err(ReportError::InvalidSelection {
            reason: "ticker and timestamp must be given together".into(),
        }),
    }
}

/// Config file values (or defaults), then command-line overrides.
pub fn build_config(cli: &Cli) -> Result<ReportConfig, ReportError> {
    let mut config = match &cli.config {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            let adapter = FileConfigAdapter::from_file(path)?;
            validate_report_config(&adapter)?;
            ReportConfig::from_port(&adapter)
        }
        None => ReportConfig::default(),
    };

    if let Some(dir) = &cli.table_dir {
        config.sources.table_dir = dir.clone();
    }
    if let Some(dir) = &cli.image_dir {
        config.sources.image_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

/// List, select and render into a PDF at `output`.
pub fn generate_report(
    config: &ReportConfig,
    selection: Option<&SelectionKey>,
    output: &Path,
) -> Result<AssemblyOutcome, ReportError> {
    match selection {
        Some(key) => log::info!("Generating report for {} into {}", key, output.display()),
        None => log::info!("Generating report from all artifacts into {}", output.display()),
    }
    let source = FsArtifactSource::new(config.delimiter, config.sorted);
    assembly::assemble(&source, &config.sources, selection, || {
        PdfReportWriter::create(output, config.page)
    })
}

pub fn run_dry_run(config: &ReportConfig, selection: Option<&SelectionKey>) -> ExitCode {
    let source = FsArtifactSource::new(config.delimiter, config.sorted);
    let listing = match assembly::list_artifacts(&source, &config.sources) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let plan = assembly::plan(&listing, selection);

    for planned in &plan.artifacts {
        match &planned.decision {
            Decision::Include => println!(
                "include {:<5}  {}",
                planned.kind,
                planned.entry.path.display()
            ),
            Decision::Skip(reason) => println!(
                "skip    {:<5}  {}  ({})",
                planned.kind,
                planned.entry.path.display(),
                reason
            ),
        }
    }
    eprintln!(
        "\nDry run complete: {} of {} artifacts would be added",
        plan.included_count(),
        plan.artifacts.len()
    );
    ExitCode::SUCCESS
}

/// Progress and skip diagnostics go to stdout as `[LEVEL] message`.
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::{Builder, Target};
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    // A second init (tests calling `run` repeatedly) is harmless.
    let _ = Builder::new()
        .filter_level(level)
        .target(Target::Stdout)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();
}
