//! Report assembly: list artifacts, decide which become pages, then render
//! them into a [`ReportSink`] in listing order.
//!
//! Failures split into two tiers. Failing to enumerate a source directory is
//! fatal and happens before the sink is opened, so no output is produced.
//! Anything that goes wrong with a single artifact is recorded as a skip and
//! the run carries on with the next one.

use std::fmt;
use std::path::PathBuf;

use crate::domain::artifact::{ArtifactDescriptor, ArtifactEntry, ArtifactKind};
use crate::domain::config::SourceDirs;
use crate::domain::error::ReportError;
use crate::domain::selection::{SelectionKey, is_selected};
use crate::ports::artifact_port::ArtifactSource;
use crate::ports::report_port::ReportSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAFile,
    NotSelected,
    UnparseableName(String),
    WrongCategory(String),
    LoadFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAFile => f.write_str("not a regular file"),
            SkipReason::NotSelected => f.write_str("does not match the selection key"),
            SkipReason::UnparseableName(reason) => write!(f, "unparseable file name: {reason}"),
            SkipReason::WrongCategory(category) => {
                write!(f, "category {category:?} is not financial values")
            }
            SkipReason::LoadFailed(cause) => write!(f, "{cause}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Include,
    Skip(SkipReason),
}

#[derive(Debug, Clone)]
pub struct PlannedArtifact {
    pub kind: ArtifactKind,
    pub entry: ArtifactEntry,
    pub decision: Decision,
}

/// Every listed entry with its decision; tables first, then images.
#[derive(Debug, Clone, Default)]
pub struct AssemblyPlan {
    pub artifacts: Vec<PlannedArtifact>,
}

impl AssemblyPlan {
    pub fn included(&self) -> impl Iterator<Item = &PlannedArtifact> {
        self.artifacts
            .iter()
            .filter(|a| a.decision == Decision::Include)
    }

    pub fn included_count(&self) -> usize {
        self.included().count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArtifactListing {
    pub tables: Vec<ArtifactEntry>,
    pub images: Vec<ArtifactEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added { page: usize },
    Skipped(SkipReason),
}

#[derive(Debug, Clone)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub file_name: String,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default)]
pub struct AssemblySummary {
    pub outcomes: Vec<ArtifactOutcome>,
}

impl AssemblySummary {
    fn added(&self, kind: ArtifactKind) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.kind == kind && matches!(o.outcome, Outcome::Added { .. }))
            .count()
    }

    pub fn tables_added(&self) -> usize {
        self.added(ArtifactKind::Table)
    }

    pub fn images_added(&self) -> usize {
        self.added(ArtifactKind::Image)
    }

    pub fn pages_added(&self) -> usize {
        self.tables_added() + self.images_added()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Skipped(_)))
    }

    /// Outcome recorded for the entry with this file name, if it was listed.
    pub fn outcome_for(&self, file_name: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|o| o.file_name == file_name)
            .map(|o| &o.outcome)
    }
}

#[derive(Debug)]
pub struct AssemblyOutcome {
    pub output: PathBuf,
    pub summary: AssemblySummary,
}

pub fn list_artifacts(
    source: &dyn ArtifactSource,
    dirs: &SourceDirs,
) -> Result<ArtifactListing, ReportError> {
    let tables = source.list(&dirs.table_dir)?;
    let images = source.list(&dirs.image_dir)?;
    log::debug!(
        "listed {} table entries in {} and {} image entries in {}",
        tables.len(),
        dirs.table_dir.display(),
        images.len(),
        dirs.image_dir.display()
    );
    Ok(ArtifactListing { tables, images })
}

pub fn plan(listing: &ArtifactListing, selection: Option<&SelectionKey>) -> AssemblyPlan {
    let tables = listing.tables.iter().map(|entry| PlannedArtifact {
        kind: ArtifactKind::Table,
        entry: entry.clone(),
        decision: decide_table(entry, selection),
    });
    let images = listing.images.iter().map(|entry| PlannedArtifact {
        kind: ArtifactKind::Image,
        entry: entry.clone(),
        decision: decide_image(entry, selection),
    });
    AssemblyPlan {
        artifacts: tables.chain(images).collect(),
    }
}

fn decide_table(entry: &ArtifactEntry, selection: Option<&SelectionKey>) -> Decision {
    if !entry.is_file {
        return Decision::Skip(SkipReason::NotAFile);
    }
    if !is_selected(selection, &entry.file_name) {
        return Decision::Skip(SkipReason::NotSelected);
    }
    match ArtifactDescriptor::parse(&entry.path) {
        Ok(descriptor) if descriptor.is_financial_values() => Decision::Include,
        Ok(descriptor) => Decision::Skip(SkipReason::WrongCategory(
            descriptor.category.to_string(),
        )),
        Err(ReportError::UnparseableName { reason, .. }) => {
            Decision::Skip(SkipReason::UnparseableName(reason))
        }
        Err(e) => Decision::Skip(SkipReason::UnparseableName(e.to_string())),
    }
}

fn decide_image(entry: &ArtifactEntry, selection: Option<&SelectionKey>) -> Decision {
    if !entry.is_file {
        Decision::Skip(SkipReason::NotAFile)
    } else if !is_selected(selection, &entry.file_name) {
        Decision::Skip(SkipReason::NotSelected)
    } else {
        Decision::Include
    }
}

/// Render every included artifact into `sink`. Never fails: per-artifact
/// errors become [`SkipReason::LoadFailed`] outcomes.
pub fn execute(
    plan: &AssemblyPlan,
    source: &dyn ArtifactSource,
    sink: &mut dyn ReportSink,
) -> AssemblySummary {
    let mut summary = AssemblySummary::default();

    for planned in &plan.artifacts {
        let outcome = match &planned.decision {
            Decision::Skip(reason) => {
                report_skip(planned, reason);
                Outcome::Skipped(reason.clone())
            }
            Decision::Include => match render(planned, source, sink) {
                Ok(page) => {
                    log::info!(
                        "Added {} {} to pdf as page {}",
                        planned.kind,
                        planned.entry.path.display(),
                        page
                    );
                    Outcome::Added { page }
                }
                Err(e) => {
                    log::warn!(
                        "A problem occurred while processing {} file {}: {}; continuing without it",
                        planned.kind,
                        planned.entry.file_name,
                        e
                    );
                    Outcome::Skipped(SkipReason::LoadFailed(e.to_string()))
                }
            },
        };

        summary.outcomes.push(ArtifactOutcome {
            kind: planned.kind,
            path: planned.entry.path.clone(),
            file_name: planned.entry.file_name.clone(),
            outcome,
        });
    }

    summary
}

fn render(
    planned: &PlannedArtifact,
    source: &dyn ArtifactSource,
    sink: &mut dyn ReportSink,
) -> Result<usize, ReportError> {
    match planned.kind {
        ArtifactKind::Table => {
            let table = source.load_table(&planned.entry.path)?;
            sink.add_table_page(&table)
        }
        ArtifactKind::Image => {
            let image = source.load_image(&planned.entry.path)?;
            sink.add_image_page(&image)
        }
    }
}

fn report_skip(planned: &PlannedArtifact, reason: &SkipReason) {
    let name = &planned.entry.file_name;
    match reason {
        SkipReason::UnparseableName(_) => {
            log::warn!("Skipping {} file {}: {}", planned.kind, name, reason)
        }
        SkipReason::WrongCategory(_) | SkipReason::NotAFile => {
            log::info!("Skipping {} file {}: {}", planned.kind, name, reason)
        }
        SkipReason::NotSelected if planned.kind == ArtifactKind::Table => {
            log::info!("Skipping {} file {}: {}", planned.kind, name, reason)
        }
        SkipReason::NotSelected | SkipReason::LoadFailed(_) => {
            log::debug!("Skipping {} file {}: {}", planned.kind, name, reason)
        }
    }
}

/// List both source directories, then open the sink and render every
/// selected artifact into it.
///
/// The sink is opened only after both listings succeed, so a missing source
/// directory leaves no output behind. Once opened, the sink is finalized on
/// every path: by `finish` here, or by its `Drop` if anything unwinds.
pub fn assemble<S, F>(
    source: &dyn ArtifactSource,
    dirs: &SourceDirs,
    selection: Option<&SelectionKey>,
    open_sink: F,
) -> Result<AssemblyOutcome, ReportError>
where
    S: ReportSink,
    F: FnOnce() -> Result<S, ReportError>,
{
    let listing = list_artifacts(source, dirs)?;
    let plan = plan(&listing, selection);
    log::debug!(
        "{} of {} artifacts selected",
        plan.included_count(),
        plan.artifacts.len()
    );

    let mut sink = open_sink()?;
    let summary = execute(&plan, source, &mut sink);
    let output = sink.finish()?;

    log::info!(
        "Successfully created pdf report as {} ({} pages: {} tables, {} images, {} skipped)",
        output.display(),
        summary.pages_added(),
        summary.tables_added(),
        summary.images_added(),
        summary.skipped().count()
    );

    Ok(AssemblyOutcome { output, summary })
}
