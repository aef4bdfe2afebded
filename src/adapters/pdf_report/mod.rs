//! PDF report writer over `lopdf`.
//!
//! The output file is created and held open by [`PdfReportWriter::create`].
//! Pages accumulate in an in-memory document; the page tree, catalog and
//! file contents are written by [`ReportSink::finish`], or by `Drop` when a
//! writer goes out of scope unfinished.

pub mod image;
pub mod tables;
pub mod text;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::domain::config::PageSetup;
use crate::domain::error::ReportError;
use crate::domain::raster::RasterImage;
use crate::domain::table::FinancialTable;
use crate::ports::report_port::ReportSink;

const FONT_RESOURCE: &str = "F1";
const IMAGE_RESOURCE: &str = "Im1";

struct OpenReport {
    file: File,
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    pages: Vec<ObjectId>,
}

pub struct PdfReportWriter {
    output: PathBuf,
    page: PageSetup,
    report: Option<OpenReport>,
}

impl PdfReportWriter {
    /// Create (or truncate) `output`, creating its parent directory if needed.
    pub fn create(output: impl Into<PathBuf>, page: PageSetup) -> Result<Self, ReportError> {
        let output = output.into();
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_directory_if_missing(parent)?;
        }
        let file = File::create(&output)?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => text::FONT_NAME,
            "Encoding" => "WinAnsiEncoding",
        });

        log::debug!("Opened {} for writing", output.display());
        Ok(Self {
            output,
            page,
            report: Some(OpenReport {
                file,
                doc,
                pages_id,
                font_id,
                pages: Vec::new(),
            }),
        })
    }

    fn open_report(&mut self) -> Result<&mut OpenReport, ReportError> {
        self.report.as_mut().ok_or_else(|| ReportError::Pdf {
            reason: format!("{} is already finished", self.output.display()),
        })
    }

    fn add_page(
        &mut self,
        operations: Vec<Operation>,
        resources: Dictionary,
    ) -> Result<usize, ReportError> {
        let page = self.page;
        let report = self.open_report()?;
        let content = Content { operations }.encode()?;
        let content_id = report.doc.add_object(Stream::new(Dictionary::new(), content));
        let media_box: Vec<Object> = vec![
            0.0f32.into(),
            0.0f32.into(),
            page.width.into(),
            page.height.into(),
        ];
        let page_id = report.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => report.pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => resources,
        });
        report.pages.push(page_id);
        Ok(report.pages.len())
    }
}

impl ReportSink for PdfReportWriter {
    fn add_table_page(&mut self, table: &FinancialTable) -> Result<usize, ReportError> {
        let font_id = self.open_report()?.font_id;
        let operations = tables::table_operations(table, &self.page, FONT_RESOURCE);
        self.add_page(
            operations,
            dictionary! { "Font" => dictionary! { FONT_RESOURCE => font_id } },
        )
    }

    fn add_image_page(&mut self, raster: &RasterImage) -> Result<usize, ReportError> {
        let image_id = self
            .open_report()?
            .doc
            .add_object(image::image_xobject(raster));
        let placement = image::fit_image(raster.width(), raster.height(), &self.page);
        self.add_page(
            image::image_operations(IMAGE_RESOURCE, &placement),
            dictionary! { "XObject" => dictionary! { IMAGE_RESOURCE => image_id } },
        )
    }

    fn page_count(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.pages.len())
    }

    fn finish(mut self) -> Result<PathBuf, ReportError> {
        let open = self.report.take().ok_or_else(|| ReportError::Pdf {
            reason: format!("{} is already finished", self.output.display()),
        })?;
        write_report(open)?;
        Ok(self.output.clone())
    }
}

impl Drop for PdfReportWriter {
    fn drop(&mut self) {
        if let Some(open) = self.report.take() {
            let pages = open.pages.len();
            match write_report(open) {
                Ok(()) => log::warn!(
                    "Report {} closed without finishing; wrote {} pages",
                    self.output.display(),
                    pages
                ),
                Err(e) => log::error!(
                    "Failed to finalize report {}: {}",
                    self.output.display(),
                    e
                ),
            }
        }
    }
}

fn write_report(open: OpenReport) -> Result<(), ReportError> {
    let OpenReport {
        file,
        mut doc,
        pages_id,
        pages,
        ..
    } = open;

    let kids: Vec<Object> = pages.iter().map(|&id| id.into()).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(pages.len() as i64),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut writer = BufWriter::new(file);
    doc.save_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn create_directory_if_missing(dir: &Path) -> Result<(), ReportError> {
    if !dir.exists() {
        log::info!("Creating directory {}", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
