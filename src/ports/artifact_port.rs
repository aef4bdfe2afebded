//! Artifact access port trait.

use std::path::Path;

use crate::domain::artifact::ArtifactEntry;
use crate::domain::error::ReportError;
use crate::domain::raster::RasterImage;
use crate::domain::table::FinancialTable;

/// Source of pre-generated report artifacts.
pub trait ArtifactSource {
    /// Entries of `dir`, in the order the source lists them. Failing to
    /// enumerate the directory is fatal for the run.
    fn list(&self, dir: &Path) -> Result<Vec<ArtifactEntry>, ReportError>;

    fn load_table(&self, path: &Path) -> Result<FinancialTable, ReportError>;

    fn load_image(&self, path: &Path) -> Result<RasterImage, ReportError>;
}
