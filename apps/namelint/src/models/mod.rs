//! Shared data models for lint notices and run reports.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
/// User-facing outcome of one rename attempt.
pub enum Notice {
    Renamed { old: String, new: String },
    RenameFailed { old: String, new: String },
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::RenameFailed { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Renamed { old, new } => write!(f, "{} renamed to {}", old, new),
            Notice::RenameFailed { old, new } => write!(
                f,
                "Unable to rename {} to {}. There probably already exists a file with this name",
                old, new
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
/// Result of linting a single file.
pub enum LintOutcome {
    /// Basename was already clean; the store was not touched.
    Unchanged { path: String },
    Renamed { from: String, to: String },
    Failed {
        from: String,
        to: String,
        reason: String,
    },
}

#[derive(Debug, Default, Serialize)]
/// Counters printed after a run.
pub struct Summary {
    pub files: usize,
    pub renamed: usize,
    pub failed: usize,
}

#[derive(Debug, Default, Serialize)]
/// Outcomes of a run plus their summary.
pub struct LintReport {
    pub results: Vec<LintOutcome>,
    pub summary: Summary,
}

impl LintReport {
    pub fn from_outcomes(results: Vec<LintOutcome>) -> Self {
        let mut summary = Summary {
            files: results.len(),
            ..Summary::default()
        };
        for r in &results {
            match r {
                LintOutcome::Renamed { .. } => summary.renamed += 1,
                LintOutcome::Failed { .. } => summary.failed += 1,
                LintOutcome::Unchanged { .. } => {}
            }
        }
        LintReport { results, summary }
    }
}
