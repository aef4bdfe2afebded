#![allow(dead_code)]

use fvreport::domain::artifact::ArtifactEntry;
use fvreport::domain::error::ReportError;
use fvreport::domain::raster::RasterImage;
use fvreport::domain::table::FinancialTable;
use fvreport::ports::artifact_port::ArtifactSource;
use fvreport::ports::report_port::ReportSink;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Once;

pub const TABLE_DIR: &str = "csv_out";
pub const IMAGE_DIR: &str = "img_out";

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn table(columns: &[&str], rows: &[&[&str]]) -> FinancialTable {
    FinancialTable::new(strings(columns), rows.iter().map(|r| strings(r)).collect()).unwrap()
}

pub fn solid_image(width: u32, height: u32) -> RasterImage {
    RasterImage::new(width, height, vec![200; (width * height * 3) as usize]).unwrap()
}

/// In-memory artifact directories. Directories that were never added fail to
/// list, like a missing directory on disk.
pub struct MockArtifactSource {
    pub dirs: HashMap<PathBuf, Vec<ArtifactEntry>>,
    pub tables: HashMap<PathBuf, FinancialTable>,
    pub images: HashMap<PathBuf, RasterImage>,
    pub errors: HashMap<PathBuf, String>,
}

impl MockArtifactSource {
    /// Empty but existing table and image directories.
    pub fn new() -> Self {
        let mut dirs = HashMap::new();
        dirs.insert(PathBuf::from(TABLE_DIR), Vec::new());
        dirs.insert(PathBuf::from(IMAGE_DIR), Vec::new());
        Self {
            dirs,
            tables: HashMap::new(),
            images: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn without_dir(mut self, dir: &str) -> Self {
        self.dirs.remove(Path::new(dir));
        self
    }

    fn push_entry(&mut self, dir: &str, entry: ArtifactEntry) {
        self.dirs.entry(PathBuf::from(dir)).or_default().push(entry);
    }

    pub fn with_table(mut self, name: &str, table: FinancialTable) -> Self {
        let path = Path::new(TABLE_DIR).join(name);
        self.push_entry(TABLE_DIR, ArtifactEntry::file(&path));
        self.tables.insert(path, table);
        self
    }

    pub fn with_image(mut self, name: &str, image: RasterImage) -> Self {
        let path = Path::new(IMAGE_DIR).join(name);
        self.push_entry(IMAGE_DIR, ArtifactEntry::file(&path));
        self.images.insert(path, image);
        self
    }

    /// A listed file whose load fails with `reason`.
    pub fn with_broken(mut self, dir: &str, name: &str, reason: &str) -> Self {
        let path = Path::new(dir).join(name);
        self.push_entry(dir, ArtifactEntry::file(&path));
        self.errors.insert(path, reason.to_string());
        self
    }

    pub fn with_subdirectory(mut self, dir: &str, name: &str) -> Self {
        let path = Path::new(dir).join(name);
        self.push_entry(
            dir,
            ArtifactEntry {
                path,
                file_name: name.to_string(),
                is_file: false,
            },
        );
        self
    }
}

impl ArtifactSource for MockArtifactSource {
    fn list(&self, dir: &Path) -> Result<Vec<ArtifactEntry>, ReportError> {
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| ReportError::SourceDirectory {
                path: dir.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
            })
    }

    fn load_table(&self, path: &Path) -> Result<FinancialTable, ReportError> {
        if let Some(reason) = self.errors.get(path) {
            return Err(ReportError::TableLoad {
                path: path.to_path_buf(),
                reason: reason.clone(),
            });
        }
        self.tables
            .get(path)
            .cloned()
            .ok_or_else(|| ReportError::TableLoad {
                path: path.to_path_buf(),
                reason: "not found".into(),
            })
    }

    fn load_image(&self, path: &Path) -> Result<RasterImage, ReportError> {
        if let Some(reason) = self.errors.get(path) {
            return Err(ReportError::ImageDecode {
                path: path.to_path_buf(),
                reason: reason.clone(),
            });
        }
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| ReportError::ImageDecode {
                path: path.to_path_buf(),
                reason: "not found".into(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPage {
    Table { columns: usize, rows: usize },
    Image { width: u32, height: u32 },
}

#[derive(Debug, Default)]
pub struct Recording {
    pub pages: Vec<RecordedPage>,
    pub finished: bool,
}

/// Sink that remembers what it was given. The recording outlives the sink,
/// which `assemble` consumes.
pub struct RecordingSink {
    output: PathBuf,
    recording: Rc<RefCell<Recording>>,
}

impl RecordingSink {
    pub fn new(output: &str) -> (Self, Rc<RefCell<Recording>>) {
        let recording = Rc::new(RefCell::new(Recording::default()));
        (
            Self {
                output: PathBuf::from(output),
                recording: Rc::clone(&recording),
            },
            recording,
        )
    }

    fn push(&mut self, page: RecordedPage) -> usize {
        let mut recording = self.recording.borrow_mut();
        recording.pages.push(page);
        recording.pages.len()
    }
}

impl ReportSink for RecordingSink {
    fn add_table_page(&mut self, table: &FinancialTable) -> Result<usize, ReportError> {
        Ok(self.push(RecordedPage::Table {
            columns: table.column_count(),
            rows: table.row_count(),
        }))
    }

    fn add_image_page(&mut self, image: &RasterImage) -> Result<usize, ReportError> {
        Ok(self.push(RecordedPage::Image {
            width: image.width(),
            height: image.height(),
        }))
    }

    fn page_count(&self) -> usize {
        self.recording.borrow().pages.len()
    }

    fn finish(self) -> Result<PathBuf, ReportError> {
        self.recording.borrow_mut().finished = true;
        Ok(self.output)
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger that keeps records on the emitting thread, so parallel tests only
/// see their own lines.
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        CAPTURED.with(|c| {
            c.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT_LOGGER: Once = Once::new();

/// Run `f` and return its result with every log line it emitted.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Vec<(log::Level, String)>) {
    INIT_LOGGER.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
    let result = f();
    let lines = CAPTURED.with(|c| c.borrow_mut().drain(..).collect());
    (result, lines)
}

/// Lines at `level` mentioning every one of `needles`.
pub fn lines_with(
    lines: &[(log::Level, String)],
    level: log::Level,
    needles: &[&str],
) -> Vec<String> {
    lines
        .iter()
        .filter(|(l, msg)| *l == level && needles.iter().all(|n| msg.contains(n)))
        .map(|(_, msg)| msg.clone())
        .collect()
}
