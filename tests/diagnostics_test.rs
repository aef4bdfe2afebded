//! Log lines emitted while building a report from files on disk.

mod common;

use common::{capture_logs, lines_with};
use fvreport::cli;
use fvreport::domain::config::{ReportConfig, SourceDirs};
use log::Level;
use std::fs;
use tempfile::TempDir;

fn config_for(root: &TempDir) -> ReportConfig {
    let sources = SourceDirs {
        table_dir: root.path().join("csv_out"),
        image_dir: root.path().join("img_out"),
    };
    fs::create_dir(&sources.table_dir).unwrap();
    fs::create_dir(&sources.image_dir).unwrap();
    ReportConfig {
        sources,
        output_dir: root.path().join("pdf_out"),
        ..ReportConfig::default()
    }
}

#[test]
fn skipped_files_are_named_with_their_cause() {
    let root = TempDir::new().unwrap();
    let config = config_for(&root);
    let tables = &config.sources.table_dir;
    fs::write(tables.join("AAPL_fv_bad.csv"), "Metric,Value\nRevenue,100,extra\n").unwrap();
    fs::write(tables.join("AAPL_oc_1.csv"), "Metric,Value\nRevenue,100\n").unwrap();
    fs::write(tables.join("AAPL_fv_good.csv"), "Metric,Value\nRevenue,100\n").unwrap();
    let output = config.output_dir.join("report.pdf");

    let (outcome, logs) = capture_logs(|| cli::generate_report(&config, None, &output));

    assert_eq!(outcome.unwrap().summary.tables_added(), 1);
    assert_eq!(
        lines_with(&logs, Level::Warn, &["AAPL_fv_bad.csv", "CSV parse error"]).len(),
        1,
        "{logs:?}"
    );
    assert_eq!(
        lines_with(&logs, Level::Info, &["Skipping table", "AAPL_oc_1.csv", "\"oc\""]).len(),
        1,
        "{logs:?}"
    );
    assert_eq!(
        lines_with(&logs, Level::Info, &["Successfully created pdf report", "1 pages"]).len(),
        1,
        "{logs:?}"
    );
}

#[test]
fn undecodable_image_is_named_in_a_warning() {
    let root = TempDir::new().unwrap();
    let config = config_for(&root);
    fs::write(config.sources.image_dir.join("AAPL_chart.png"), b"not a png").unwrap();
    let output = config.output_dir.join("report.pdf");

    let (outcome, logs) = capture_logs(|| cli::generate_report(&config, None, &output));

    assert_eq!(outcome.unwrap().summary.pages_added(), 0);
    assert_eq!(
        lines_with(&logs, Level::Warn, &["image file AAPL_chart.png", "continuing without it"])
            .len(),
        1,
        "{logs:?}"
    );
}
