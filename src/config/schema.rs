use crate::locate::{validate_name, ScanOptions};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SpliceConfig {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub scan: ScanOptions,
    #[serde(default)]
    pub jobs: Vec<JobDefinition>,
}

impl SpliceConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.jobs.is_empty() {
            issues.push(ValidationIssue::EmptyJobList);
        }

        if self.scan.keywords.iter().all(|k| k.trim().is_empty()) {
            issues.push(ValidationIssue::InvalidScan {
                message: "scan.keywords must contain at least one keyword".to_string(),
            });
        }
        if self.scan.max_signature_bytes == 0 {
            issues.push(ValidationIssue::InvalidScan {
                message: "scan.max_signature_bytes must be greater than zero".to_string(),
            });
        }
        if self.scan.max_block_bytes == 0 {
            issues.push(ValidationIssue::InvalidScan {
                message: "scan.max_block_bytes must be greater than zero".to_string(),
            });
        }

        let mut seen_ids = HashSet::new();

        for job in &self.jobs {
            if job.id.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    job_id: None,
                    field: "id",
                });
            } else if !seen_ids.insert(job.id.as_str()) {
                issues.push(ValidationIssue::DuplicateJob { id: job.id.clone() });
            }
            if job.donor.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    job_id: Some(job.id.clone()),
                    field: "donor",
                });
            }
            if job.target.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    job_id: Some(job.id.clone()),
                    field: "target",
                });
            }
            if job.blocks.is_empty() {
                issues.push(ValidationIssue::MissingField {
                    job_id: Some(job.id.clone()),
                    field: "blocks",
                });
            }
            for name in &job.blocks {
                if validate_name(name).is_err() {
                    issues.push(ValidationIssue::InvalidBlockName {
                        job_id: job.id.clone(),
                        name: name.clone(),
                    });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Resolve donor/target paths against the root passed to the runner
    #[serde(default)]
    pub workspace_relative: bool,
}

/// One donor/target pair and the ordered block names to move between them.
#[derive(Debug, Deserialize, Clone)]
pub struct JobDefinition {
    pub id: String,
    pub donor: String,
    pub target: String,
    #[serde(default)]
    pub blocks: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyJobList,
    MissingField {
        job_id: Option<String>,
        field: &'static str,
    },
    DuplicateJob {
        id: String,
    },
    InvalidBlockName {
        job_id: String,
        name: String,
    },
    InvalidScan {
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyJobList => write!(f, "splice config contains no jobs"),
            ValidationIssue::MissingField { job_id, field } => match job_id {
                Some(id) => write!(f, "job '{id}' missing required field '{field}'"),
                None => write!(f, "job missing required field '{field}'"),
            },
            ValidationIssue::DuplicateJob { id } => write!(f, "duplicate job id '{id}'"),
            ValidationIssue::InvalidBlockName { job_id, name } => {
                write!(f, "job '{job_id}' has invalid block name '{name}'")
            }
            ValidationIssue::InvalidScan { message } => {
                write!(f, "invalid scan options: {message}")
            }
        }
    }
}
