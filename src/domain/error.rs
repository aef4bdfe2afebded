//! Domain error types.

use std::path::PathBuf;

use crate::domain::raster::RasterError;
use crate::domain::table::TableError;

/// Top-level error type for fvreport.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid selection key: {reason}")]
    InvalidSelection { reason: String },

    #[error("cannot read source directory {}: {source}", path.display())]
    SourceDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unparseable artifact file name {file_name:?}: {reason}")]
    UnparseableName { file_name: String, reason: String },

    #[error("failed to load table {}: {reason}", path.display())]
    TableLoad { path: PathBuf, reason: String },

    #[error("invalid table {}: {source}", path.display())]
    InvalidTable {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("failed to decode image {}: {reason}", path.display())]
    ImageDecode { path: PathBuf, reason: String },

    #[error("invalid image {}: {source}", path.display())]
    InvalidImage {
        path: PathBuf,
        #[source]
        source: RasterError,
    },

    #[error("PDF error: {reason}")]
    Pdf { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for ReportError {
    fn from(e: lopdf::Error) -> Self {
        ReportError::Pdf {
            reason: e.to_string(),
        }
    }
}

impl ReportError {
    /// Process exit status for a run that failed with this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            ReportError::Io(_) | ReportError::Pdf { .. } => 1,
            ReportError::ConfigParse { .. }
            | ReportError::ConfigInvalid { .. }
            | ReportError::InvalidSelection { .. } => 2,
            ReportError::SourceDirectory { .. } => 3,
            ReportError::UnparseableName { .. }
            | ReportError::TableLoad { .. }
            | ReportError::InvalidTable { .. }
            | ReportError::ImageDecode { .. }
            | ReportError::InvalidImage { .. } => 4,
        }
    }
}

impl From<&ReportError> for std::process::ExitCode {
    fn from(err: &ReportError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
