//! Mock summarisation provider for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::provider::SummaryProvider;

/// Mock summarisation provider.
///
/// Returns a deterministic two-part response derived from the first code
/// line, records every request, and can be configured to fail or to return
/// a fixed (possibly malformed) response.
pub struct MockSummaryProvider {
    fixed_response: Option<String>,
    should_fail: bool,
    latency_ms: u64,
    call_count: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl MockSummaryProvider {
    pub fn new() -> Self {
        Self {
            fixed_response: None,
            should_fail: false,
            latency_ms: 0,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the given response verbatim for every request.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Makes every request fail.
    pub fn should_fail(mut self, fail: bool) -> Self {
        self.should_fail = fail;
        self
    }

    /// Sets a simulated latency per request.
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Number of summarize calls issued so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests in the order they were received.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn generate_response(code: &str) -> String {
        let first_line = code.lines().next().unwrap_or("").trim();
        format!(
            "Handles `{first_line}`.\n---\nExecutes the body of `{first_line}` line by line."
        )
    }
}

impl Default for MockSummaryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SummaryProvider for MockSummaryProvider {
    async fn summarize(&self, code: &str) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(code.to_string());

        if self.should_fail {
            anyhow::bail!("mock summary provider configured to fail");
        }

        if self.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;
        }

        Ok(self
            .fixed_response
            .clone()
            .unwrap_or_else(|| Self::generate_response(code)))
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.should_fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Summary;

    #[tokio::test]
    async fn test_mock_response_parses_as_summary() {
        let provider = MockSummaryProvider::new();
        let response = provider.summarize("def run():\n    pass").await.unwrap();

        let summary = Summary::parse("run", &response).unwrap();
        assert!(summary.business.contains("def run():"));
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let provider = MockSummaryProvider::new();
        provider.summarize("first").await.unwrap();
        provider.summarize("second").await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.requests(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_mock_fixed_response() {
        let provider = MockSummaryProvider::new().with_response("no delimiter here");
        let response = provider.summarize("anything").await.unwrap();
        assert_eq!(response, "no delimiter here");
    }

    #[tokio::test]
    async fn test_mock_should_fail() {
        let provider = MockSummaryProvider::new().should_fail(true);
        assert!(provider.summarize("code").await.is_err());
        assert!(!provider.health_check().await.unwrap());
        // Failed calls still count towards instrumentation.
        assert_eq!(provider.call_count(), 1);
    }
}
