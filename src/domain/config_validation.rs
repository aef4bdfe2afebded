//! Configuration validation.
//!
//! Validates all config fields before a report run.

use crate::domain::config::{
    DEFAULT_PAGE_HEIGHT, DEFAULT_PAGE_MARGIN, DEFAULT_PAGE_WIDTH, parse_delimiter,
};
use crate::domain::error::ReportError;
use crate::ports::config_port::ConfigPort;

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), ReportError> {
    validate_directory(config, "sources", "table_dir")?;
    validate_directory(config, "sources", "image_dir")?;
    validate_directory(config, "output", "dir")?;
    validate_delimiter(config)?;
    validate_page(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> ReportError {
    ReportError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_directory(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), ReportError> {
    match config.get_string(section, key) {
        Some(value) if value.trim().is_empty() => {
            Err(invalid(section, key, format!("{key} must not be empty")))
        }
        _ => Ok(()),
    }
}

fn validate_delimiter(config: &dyn ConfigPort) -> Result<(), ReportError> {
    match config.get_string("sources", "delimiter") {
        Some(value) if parse_delimiter(&value).is_none() => Err(invalid(
            "sources",
            "delimiter",
            format!("delimiter must be a single ASCII character, got {value:?}"),
        )),
        _ => Ok(()),
    }
}

/// Present values must parse; absent ones take the default.
fn number(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, ReportError> {
    match config.get_string("page", key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid("page", key, format!("{key} must be a number, got {raw:?}"))),
    }
}

fn validate_page(config: &dyn ConfigPort) -> Result<(), ReportError> {
    let width = number(config, "width", DEFAULT_PAGE_WIDTH)?;
    if width <= 0.0 {
        return Err(invalid("page", "width", "width must be positive"));
    }
    let height = number(config, "height", DEFAULT_PAGE_HEIGHT)?;
    if height <= 0.0 {
        return Err(invalid("page", "height", "height must be positive"));
    }
    let margin = number(config, "margin", DEFAULT_PAGE_MARGIN)?;
    if margin < 0.0 {
        return Err(invalid("page", "margin", "margin must be non-negative"));
    }
    if 2.0 * margin >= width.min(height) {
        return Err(invalid(
            "page",
            "margin",
            "margin leaves no drawable area on the page",
        ));
    }
    Ok(())
}
