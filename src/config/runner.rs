//! Splice runner - executes the jobs of a splice config against files
//!
//! Per job the donor and target are each read once, the batch driver runs
//! in memory, and the target is written once at the end (only when it
//! changed and the run mode allows writing).

use crate::batch::{transplant, BatchReport};
use crate::config::schema::{JobDefinition, SpliceConfig};
use crate::document::Document;
use crate::locate::BlockLocator;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Whether a run may write target files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Write,
    /// Compute reports only; never touch the filesystem
    Check,
}

/// Outcome of one job.
#[derive(Debug, Clone)]
#[must_use = "JobReport should be checked for failed blocks"]
pub struct JobReport {
    pub donor: PathBuf,
    pub target: PathBuf,
    /// Target contents before the batch ran
    pub original: Document,
    pub report: BatchReport,
    /// The rewritten target was persisted
    pub written: bool,
}

impl JobReport {
    pub fn changed(&self) -> bool {
        self.report.document != self.original
    }
}

#[derive(Debug)]
pub enum RunError {
    /// Donor or target could not be read
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Rewritten target could not be written
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            RunError::Write { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Read { source, .. } | RunError::Write { source, .. } => Some(source),
        }
    }
}

/// Run every job in `config`, in order.
///
/// A failing job is reported and never stops later jobs. Jobs that share a
/// file see the output of earlier jobs in both modes: each job's rewritten
/// target is staged in memory, so a check run reports what a write run
/// would do.
pub fn run_config(
    config: &SpliceConfig,
    root: &Path,
    mode: RunMode,
) -> Vec<(String, Result<JobReport, RunError>)> {
    let locator = BlockLocator::new(config.scan.clone());
    let mut staged = Staged::default();

    config
        .jobs
        .iter()
        .map(|job| {
            let span = tracing::info_span!("job", id = %job.id);
            let _guard = span.enter();
            let result = run_job(
                &locator,
                job,
                config.meta.workspace_relative,
                root,
                mode,
                &mut staged,
            );
            (job.id.clone(), result)
        })
        .collect()
}

/// Latest contents of every file a run has produced, keyed by resolved path.
#[derive(Debug, Default)]
struct Staged {
    files: HashMap<PathBuf, Document>,
}

impl Staged {
    fn read(&self, path: &Path) -> Result<Document, RunError> {
        if let Some(document) = self.files.get(path) {
            return Ok(document.clone());
        }
        Document::read(path).map_err(|source| RunError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn stage(&mut self, path: PathBuf, document: Document) {
        self.files.insert(path, document);
    }
}

fn resolve(path: &str, workspace_relative: bool, root: &Path) -> PathBuf {
    if workspace_relative {
        root.join(path)
    } else {
        PathBuf::from(path)
    }
}

fn run_job(
    locator: &BlockLocator,
    job: &JobDefinition,
    workspace_relative: bool,
    root: &Path,
    mode: RunMode,
    staged: &mut Staged,
) -> Result<JobReport, RunError> {
    let donor_path = resolve(&job.donor, workspace_relative, root);
    let target_path = resolve(&job.target, workspace_relative, root);

    let donor = staged.read(&donor_path)?;
    let original = staged.read(&target_path)?;

    let report = transplant(locator, donor.as_str(), original.clone(), job.blocks.as_slice());

    let mut written = false;
    if report.document != original {
        if mode == RunMode::Write {
            report
                .document
                .persist(&target_path)
                .map_err(|source| RunError::Write {
                    path: target_path.clone(),
                    source,
                })?;
            written = true;
            tracing::info!(
                path = %target_path.display(),
                bytes = report.output_len,
                "wrote target"
            );
        }
        staged.stage(target_path.clone(), report.document.clone());
    }

    Ok(JobReport {
        donor: donor_path,
        target: target_path,
        original,
        report,
        written,
    })
}
