//! Artifact descriptors parsed from the file naming convention.
//!
//! Artifacts are named `<prefix>_<category>_<rest>.<ext>`, where `<rest>`
//! carries the ticker and timestamp. Parsing happens once, at enumeration
//! time, so that a malformed name surfaces as a diagnostic instead of being
//! silently misclassified.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::ReportError;

/// Category token marking a financial-values table.
pub const FINANCIAL_VALUES_MARKER: &str = "fv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactCategory {
    FinancialValues,
    Other(String),
}

impl ArtifactCategory {
    pub fn from_token(token: &str) -> Self {
        if token == FINANCIAL_VALUES_MARKER {
            ArtifactCategory::FinancialValues
        } else {
            ArtifactCategory::Other(token.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ArtifactCategory::FinancialValues => FINANCIAL_VALUES_MARKER,
            ArtifactCategory::Other(s) => s,
        }
    }
}

impl fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which input stream an entry was listed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Table,
    Image,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Table => f.pad("table"),
            ArtifactKind::Image => f.pad("image"),
        }
    }
}

/// A directory entry as reported by an
/// [`ArtifactSource`](crate::ports::artifact_port::ArtifactSource).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub path: PathBuf,
    pub file_name: String,
    pub is_file: bool,
}

impl ArtifactEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            is_file: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub path: PathBuf,
    pub file_name: String,
    pub prefix: String,
    pub category: ArtifactCategory,
    /// Everything after the category token, still `_`-joined.
    pub tail: String,
}

impl ArtifactDescriptor {
    pub fn parse(path: &Path) -> Result<Self, ReportError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReportError::UnparseableName {
                file_name: path.display().to_string(),
                reason: "file name is not valid UTF-8".into(),
            })?;
        let (prefix, category, tail) = split_name(file_name).map_err(|reason| {
            ReportError::UnparseableName {
                file_name: file_name.to_string(),
                reason: reason.into(),
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file_name: file_name.to_string(),
            prefix: prefix.to_string(),
            category: ArtifactCategory::from_token(category),
            tail: tail.to_string(),
        })
    }

    pub fn is_financial_values(&self) -> bool {
        self.category == ArtifactCategory::FinancialValues
    }
}

fn split_name(file_name: &str) -> Result<(&str, &str, &str), &'static str> {
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(pos) => &file_name[..pos],
    };
    let mut parts = stem.splitn(3, '_');
    let prefix = parts.next().unwrap_or_default();
    let category = parts.next().ok_or("no '_'-separated category token")?;
    if category.is_empty() {
        return Err("empty category token");
    }
    Ok((prefix, category, parts.next().unwrap_or_default()))
}
