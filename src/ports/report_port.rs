//! Report output port trait.

use std::path::PathBuf;

use crate::domain::error::ReportError;
use crate::domain::raster::RasterImage;
use crate::domain::table::FinancialTable;

/// Destination receiving report pages one at a time.
///
/// Implementations own their output resource from construction until
/// [`finish`](ReportSink::finish); they must also finalize it when dropped
/// unfinished.
pub trait ReportSink {
    /// Append a table page and return its 1-based page number.
    fn add_table_page(&mut self, table: &FinancialTable) -> Result<usize, ReportError>;

    /// Append an image page and return its 1-based page number.
    fn add_image_page(&mut self, image: &RasterImage) -> Result<usize, ReportError>;

    fn page_count(&self) -> usize;

    /// Flush and close the output, returning where it was written.
    fn finish(self) -> Result<PathBuf, ReportError>
    where
        Self: Sized;
}
