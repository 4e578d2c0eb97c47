use std::path::PathBuf;

use serde::Serialize;

use super::environment::EnvTag;

/// What happened to a single base name during materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Copied,
    SkippedMissingSource,
    SkippedDestinationExists,
}

impl Outcome {
    pub fn is_copied(self) -> bool {
        matches!(self, Outcome::Copied)
    }
}

/// One row of a materialization report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterializeEntry {
    pub base: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub outcome: Outcome,
}

/// Result of materializing every base name for one environment tag.
///
/// Entries keep the order of the base-name list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterializeReport {
    pub env: EnvTag,
    pub dry_run: bool,
    pub entries: Vec<MaterializeEntry>,
}

impl MaterializeReport {
    /// Number of files copied (or that would be copied on a dry run).
    pub fn copied(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_copied()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.len() - self.copied()
    }

    /// Outcome recorded for `base`, if it was part of the run.
    #[allow(dead_code)]
    pub fn outcome_of(&self, base: &str) -> Option<Outcome> {
        self.entries
            .iter()
            .find(|e| e.base == base)
            .map(|e| e.outcome)
    }
}
