//! Filesystem artifact adapter: CSV tables via `csv`, images via `image`.

use crate::domain::artifact::ArtifactEntry;
use crate::domain::error::ReportError;
use crate::domain::raster::RasterImage;
use crate::domain::table::FinancialTable;
use crate::ports::artifact_port::ArtifactSource;
use std::fs;
use std::path::Path;

pub struct FsArtifactSource {
    delimiter: u8,
    sorted: bool,
}

impl Default for FsArtifactSource {
    fn default() -> Self {
        Self::new(b',', false)
    }
}

impl FsArtifactSource {
    /// `sorted` orders listings by file name; otherwise entries keep the
    /// order the filesystem returns them in.
    pub fn new(delimiter: u8, sorted: bool) -> Self {
        Self { delimiter, sorted }
    }
}

impl ArtifactSource for FsArtifactSource {
    fn list(&self, dir: &Path) -> Result<Vec<ArtifactEntry>, ReportError> {
        let dir_error = |source: std::io::Error| ReportError::SourceDirectory {
            path: dir.to_path_buf(),
            source,
        };
        let entries = fs::read_dir(dir).map_err(dir_error)?;

        let mut listed = Vec::new();
        for entry in entries {
            let entry = entry.map_err(dir_error)?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false)
                || entry.path().is_file();
            listed.push(ArtifactEntry {
                path: entry.path(),
                file_name: entry.file_name().to_string_lossy().into_owned(),
                is_file,
            });
        }

        if self.sorted {
            listed.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        }
        Ok(listed)
    }

    fn load_table(&self, path: &Path) -> Result<FinancialTable, ReportError> {
        let load_error = |reason: String| ReportError::TableLoad {
            path: path.to_path_buf(),
            reason,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_path(path)
            .map_err(|e| load_error(e.to_string()))?;

        let columns: Vec<String> = rdr
            .headers()
            .map_err(|e| load_error(format!("CSV header error: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| load_error(format!("CSV parse error: {}", e)))?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        FinancialTable::new(columns, rows).map_err(|source| ReportError::InvalidTable {
            path: path.to_path_buf(),
            source,
        })
    }

    fn load_image(&self, path: &Path) -> Result<RasterImage, ReportError> {
        let decoded = image::open(path).map_err(|e| ReportError::ImageDecode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // Composite any alpha channel onto a white page.
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = u16::from(a);
            for channel in [r, g, b] {
                let blended = (u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
                rgb.push(blended as u8);
            }
        }

        RasterImage::new(width, height, rgb).map_err(|source| ReportError::InvalidImage {
            path: path.to_path_buf(),
            source,
        })
    }
}
