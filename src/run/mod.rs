mod orchestrator;
mod summary;

pub use orchestrator::RunOrchestrator;
pub use summary::{OutcomeStatus, ReportOutcome, RunSummary};
