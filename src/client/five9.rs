use super::envelope;
use super::service::{ReportHandle, ReportService};
use crate::config::{Credentials, ReportRequest};
use crate::errors::CallhaulError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://api.five9.com/wsadmin/v13/AdminWebService";

/// Client for the Five9 admin reporting endpoint.
pub struct Five9Client {
    client: Client,
    endpoint: String,
}

impl Five9Client {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint (e.g. a test server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn call(
        &self,
        credentials: &Credentials,
        body: String,
        operation: &str,
    ) -> Result<String, CallhaulError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .header("Content-Type", "text/xml")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                CallhaulError::Transport(format!("{} request failed: {}", operation, e))
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            CallhaulError::Transport(format!("{} response read failed: {}", operation, e))
        })?;

        if !status.is_success() {
            return Err(CallhaulError::Transport(format!(
                "{} returned HTTP {}: {}",
                operation,
                status.as_u16(),
                truncate(&text, 300),
            )));
        }

        debug!(operation, bytes = text.len(), "Reporting call completed");
        Ok(text)
    }
}

impl Default for Five9Client {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportService for Five9Client {
    async fn submit(
        &self,
        credentials: &Credentials,
        request: &ReportRequest,
    ) -> Result<ReportHandle, CallhaulError> {
        let body = envelope::run_report_body(
            &request.folder,
            &request.name,
            &request.range_start,
            &request.range_end,
        );
        let response = self.call(credentials, body, "runReport").await?;
        let identifier = envelope::extract_return(&response)?;
        if identifier.is_empty() {
            return Err(CallhaulError::Protocol(
                "runReport returned an empty identifier".into(),
            ));
        }
        Ok(ReportHandle::new(identifier))
    }

    async fn is_running(
        &self,
        credentials: &Credentials,
        handle: &ReportHandle,
    ) -> Result<bool, CallhaulError> {
        let body = envelope::is_running_body(handle.as_str());
        let response = self.call(credentials, body, "isReportRunning").await?;
        let value = envelope::extract_return(&response)?;
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(CallhaulError::Protocol(format!(
                "isReportRunning returned a non-boolean value: {}",
                truncate(&value, 80),
            )))
        }
    }

    async fn fetch_results(
        &self,
        credentials: &Credentials,
        handle: &ReportHandle,
    ) -> Result<String, CallhaulError> {
        let body = envelope::fetch_results_body(handle.as_str());
        let response = self.call(credentials, body, "getReportResultCsv").await?;
        envelope::extract_return(&response)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("hello", 300), "hello");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "x".repeat(500);
        let out = truncate(&long, 300);
        assert_eq!(out.len(), 303);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_endpoint_override() {
        let client = Five9Client::new().with_endpoint("http://localhost:9999/soap");
        assert_eq!(client.endpoint, "http://localhost:9999/soap");
    }
}
