use super::summary::{ReportOutcome, RunSummary};
use crate::client::ReportService;
use crate::config::{ReportRequest, RunConfig};
use crate::errors::CallhaulError;
use crate::persist;
use crate::poller::{wait_for_completion, PollSettings};
use crate::transfer::Uploader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the report list sequentially: submit, poll, fetch, persist, and
/// optionally upload, recording exactly one outcome per request. One
/// request's failure never stops the requests after it.
pub struct RunOrchestrator {
    config: RunConfig,
    service: Arc<dyn ReportService>,
    uploader: Arc<dyn Uploader>,
}

impl RunOrchestrator {
    pub fn new(
        config: RunConfig,
        service: Arc<dyn ReportService>,
        uploader: Arc<dyn Uploader>,
    ) -> Self {
        Self {
            config,
            service,
            uploader,
        }
    }

    pub async fn run(&self) -> RunSummary {
        let run_started = std::time::Instant::now();
        let total = self.config.reports.len();
        let mut summary = RunSummary::default();

        for (index, request) in self.config.reports.iter().enumerate() {
            info!(
                report = %request.name,
                folder = %request.folder,
                position = index + 1,
                total,
                "Processing report"
            );

            match self.run_one(request).await {
                Ok((artifact_path, duration_secs)) => {
                    if let Some(target) = &self.config.transfer {
                        // The report was retrieved either way; a failed
                        // upload is logged by the uploader and the local
                        // artifact stays on disk.
                        self.uploader.upload(&artifact_path, target).await;
                    }
                    info!(
                        report = %request.name,
                        artifact = %artifact_path.display(),
                        duration_secs = format!("{:.1}", duration_secs),
                        "Report succeeded"
                    );
                    summary.record(ReportOutcome::success(
                        &request.name,
                        artifact_path,
                        duration_secs,
                    ));
                }
                Err(e) => {
                    warn!(report = %request.name, error = %e, "Report failed");
                    summary.record(ReportOutcome::failed(&request.name, e.to_string()));
                }
            }

            info!(
                processed = index + 1,
                total,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Progress"
            );
        }

        summary.total_duration_secs = run_started.elapsed().as_secs_f64();
        self.write_summary_json(&summary).await;
        summary
    }

    async fn run_one(&self, request: &ReportRequest) -> Result<(PathBuf, f64), CallhaulError> {
        let started = std::time::Instant::now();

        let handle = self
            .service
            .submit(&self.config.credentials, request)
            .await?;
        info!(report = %request.name, handle = %handle, "Report submitted");

        let settings = PollSettings {
            interval: self.config.poll_interval,
            timeout: self.config.poll_timeout,
        };
        wait_for_completion(
            self.service.as_ref(),
            &self.config.credentials,
            &handle,
            &settings,
        )
        .await?;

        let payload = self
            .service
            .fetch_results(&self.config.credentials, &handle)
            .await?;
        let artifact_path =
            persist::save_artifact(&payload, &self.config.output_dir, &request.name).await?;

        Ok((artifact_path, started.elapsed().as_secs_f64()))
    }

    /// Write the machine-readable summary next to the artifacts. Best-effort:
    /// a failure here must not fail a run that already has its outcomes.
    async fn write_summary_json(&self, summary: &RunSummary) {
        let path = self.config.output_dir.join("run_summary.json");
        match serde_json::to_string_pretty(summary) {
            Ok(json) => {
                if let Err(e) = tokio::fs::write(&path, &json).await {
                    warn!(error = %e, "Failed to write run summary");
                } else {
                    info!(path = %path.display(), "Run summary written");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize run summary"),
        }
    }
}
