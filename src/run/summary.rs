use serde::Serialize;
use std::path::PathBuf;

/// Terminal state of one report request. Exactly one outcome is produced per
/// request; immutable once recorded.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub name: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success {
        artifact_path: PathBuf,
        duration_secs: f64,
    },
    Failed {
        error: String,
    },
}

impl ReportOutcome {
    pub fn success(name: impl Into<String>, artifact_path: PathBuf, duration_secs: f64) -> Self {
        Self {
            name: name.into(),
            status: OutcomeStatus::Success {
                artifact_path,
                duration_secs,
            },
        }
    }

    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: OutcomeStatus::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success { .. })
    }
}

/// Ordered outcomes of one full pass over the report list, plus aggregate
/// counts. `succeeded + failed` always equals the number of outcomes.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RunSummary {
    pub outcomes: Vec<ReportOutcome>,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration_secs: f64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: ReportOutcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}
