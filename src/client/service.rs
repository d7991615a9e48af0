use crate::config::{Credentials, ReportRequest};
use crate::errors::CallhaulError;
use async_trait::async_trait;

/// Opaque identifier correlating poll and fetch calls to one submitted report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHandle(String);

impl ReportHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three remote operations of the reporting endpoint. Each call performs
/// exactly one outbound request; retry policy belongs to callers.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Submit a report for execution; returns the handle for poll/fetch.
    async fn submit(
        &self,
        credentials: &Credentials,
        request: &ReportRequest,
    ) -> Result<ReportHandle, CallhaulError>;

    /// Whether the report behind `handle` is still being generated.
    async fn is_running(
        &self,
        credentials: &Credentials,
        handle: &ReportHandle,
    ) -> Result<bool, CallhaulError>;

    /// Fetch the finished report's result body, verbatim.
    async fn fetch_results(
        &self,
        credentials: &Credentials,
        handle: &ReportHandle,
    ) -> Result<String, CallhaulError>;
}
