//! Report configuration model.
//!
//! Replaces the fixed `csv_out` / `img_out` / `pdf_out` directory constants
//! with explicit fields read through a [`ConfigPort`].

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::domain::selection::SelectionKey;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_TABLE_DIR: &str = "csv_out";
pub const DEFAULT_IMAGE_DIR: &str = "img_out";
pub const DEFAULT_OUTPUT_DIR: &str = "pdf_out";

/// 12 x 8 inches at 72 points per inch.
pub const DEFAULT_PAGE_WIDTH: f64 = 864.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 576.0;
pub const DEFAULT_PAGE_MARGIN: f64 = 36.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SourceDirs {
    pub table_dir: PathBuf,
    pub image_dir: PathBuf,
}

/// Page geometry in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_WIDTH as f32,
            height: DEFAULT_PAGE_HEIGHT as f32,
            margin: DEFAULT_PAGE_MARGIN as f32,
        }
    }
}

impl PageSetup {
    pub fn drawable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn drawable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub sources: SourceDirs,
    pub output_dir: PathBuf,
    pub delimiter: u8,
    pub sorted: bool,
    pub page: PageSetup,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sources: SourceDirs {
                table_dir: PathBuf::from(DEFAULT_TABLE_DIR),
                image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            },
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            delimiter: b',',
            sorted: false,
            page: PageSetup::default(),
        }
    }
}

impl ReportConfig {
    /// Read every field from `config`, falling back to the defaults.
    /// Call [`validate_report_config`](crate::domain::config_validation::validate_report_config)
    /// first; an invalid delimiter here silently falls back to `,`.
    pub fn from_port(config: &dyn ConfigPort) -> Self {
        let defaults = Self::default();
        let dir = |section: &str, key: &str, fallback: &Path| {
            config
                .get_string(section, key)
                .map(PathBuf::from)
                .unwrap_or_else(|| fallback.to_path_buf())
        };

        Self {
            sources: SourceDirs {
                table_dir: dir("sources", "table_dir", &defaults.sources.table_dir),
                image_dir: dir("sources", "image_dir", &defaults.sources.image_dir),
            },
            output_dir: dir("output", "dir", &defaults.output_dir),
            delimiter: config
                .get_string("sources", "delimiter")
                .and_then(|d| parse_delimiter(&d))
                .unwrap_or(defaults.delimiter),
            sorted: config.get_bool("sources", "sorted", defaults.sorted),
            page: PageSetup {
                width: config.get_double("page", "width", DEFAULT_PAGE_WIDTH) as f32,
                height: config.get_double("page", "height", DEFAULT_PAGE_HEIGHT) as f32,
                margin: config.get_double("page", "margin", DEFAULT_PAGE_MARGIN) as f32,
            },
        }
    }

    /// Where the report lands when no explicit output path is given.
    pub fn default_output_path(&self, key: Option<&SelectionKey>, now: NaiveDateTime) -> PathBuf {
        let file_name = match key {
            Some(k) => k.report_file_name(),
            None => format!("report_{}.pdf", now.format("%Y-%m-%d_%H-%M-%S")),
        };
        self.output_dir.join(file_name)
    }
}

/// A delimiter is a single ASCII character; `\t` is accepted as an escape.
pub fn parse_delimiter(raw: &str) -> Option<u8> {
    if raw == "\\t" {
        return Some(b'\t');
    }
    match raw.as_bytes() {
        [b] if b.is_ascii() => Some(*b),
        _ => None,
    }
}
