use crate::client::{ReportHandle, ReportService};
use crate::config::Credentials;
use crate::errors::CallhaulError;
use std::time::Duration;
use tracing::debug;

/// Poll cadence and the hard wall-clock bound on one report's generation.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Wait until the report behind `handle` finishes generating. Checks status
/// at a fixed interval; once the elapsed wall-clock time passes the timeout
/// the report is abandoned with a Timeout error. Status-check failures
/// propagate unchanged and abort the wait.
pub async fn wait_for_completion(
    service: &dyn ReportService,
    credentials: &Credentials,
    handle: &ReportHandle,
    settings: &PollSettings,
) -> Result<(), CallhaulError> {
    let started = tokio::time::Instant::now();

    loop {
        if !service.is_running(credentials, handle).await? {
            return Ok(());
        }

        let elapsed = started.elapsed();
        if elapsed > settings.timeout {
            return Err(CallhaulError::Timeout(format!(
                "Report timed out after {} seconds",
                settings.timeout.as_secs(),
            )));
        }

        debug!(
            handle = %handle,
            elapsed_secs = elapsed.as_secs(),
            "Report still running"
        );
        tokio::time::sleep(settings.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportRequest;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct ScriptedService {
        running_polls: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ReportService for ScriptedService {
        async fn submit(
            &self,
            _credentials: &Credentials,
            _request: &ReportRequest,
        ) -> Result<ReportHandle, CallhaulError> {
            Ok(ReportHandle::new("h1"))
        }

        async fn is_running(
            &self,
            _credentials: &Credentials,
            _handle: &ReportHandle,
        ) -> Result<bool, CallhaulError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(call < self.running_polls)
        }

        async fn fetch_results(
            &self,
            _credentials: &Credentials,
            _handle: &ReportHandle,
        ) -> Result<String, CallhaulError> {
            Ok(String::new())
        }
    }

    fn creds() -> Credentials {
        Credentials {
            username: "user".into(),
            password: "pass".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completes_when_running_goes_false() {
        let service = ScriptedService {
            running_polls: 3,
            calls: AtomicU32::new(0),
        };
        let handle = ReportHandle::new("h1");
        let result =
            wait_for_completion(&service, &creds(), &handle, &PollSettings::default()).await;
        assert!(result.is_ok());
        assert_eq!(service.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_when_report_never_finishes() {
        let service = ScriptedService {
            running_polls: u32::MAX,
            calls: AtomicU32::new(0),
        };
        let handle = ReportHandle::new("h1");
        let result =
            wait_for_completion(&service, &creds(), &handle, &PollSettings::default()).await;
        assert!(matches!(result, Err(CallhaulError::Timeout(_))));
        // 300s bound at a 5s cadence: the timeout fires on the first poll
        // past the bound, not before.
        let polls = service.calls.load(Ordering::SeqCst);
        assert!(polls >= 61, "expected ~61 polls, got {}", polls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_error_aborts_the_wait() {
        struct FailingService;

        #[async_trait]
        impl ReportService for FailingService {
            async fn submit(
                &self,
                _credentials: &Credentials,
                _request: &ReportRequest,
            ) -> Result<ReportHandle, CallhaulError> {
                unreachable!()
            }

            async fn is_running(
                &self,
                _credentials: &Credentials,
                _handle: &ReportHandle,
            ) -> Result<bool, CallhaulError> {
                Err(CallhaulError::Transport("connection reset".into()))
            }

            async fn fetch_results(
                &self,
                _credentials: &Credentials,
                _handle: &ReportHandle,
            ) -> Result<String, CallhaulError> {
                unreachable!()
            }
        }

        let handle = ReportHandle::new("h1");
        let result =
            wait_for_completion(&FailingService, &creds(), &handle, &PollSettings::default())
                .await;
        assert!(matches!(result, Err(CallhaulError::Transport(_))));
    }
}
